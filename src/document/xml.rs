/*!
 * Arena-backed XML tree built with quick-xml.
 *
 * Nodes live in a vector and refer to each other by index. Detached nodes
 * (replaced runs, unused clones) stay in the arena but are never
 * serialized. Events before and after the root element (declaration,
 * processing instructions, whitespace) are kept verbatim.
 */

use quick_xml::events::{BytesCData, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use super::tree::{ElementTree, NodeId};
use crate::errors::XmlError;

#[derive(Debug, Clone)]
struct ElementData {
    name: String,
    attributes: Vec<(String, String)>,
    self_closing: bool,
}

#[derive(Debug, Clone)]
enum NodeKind {
    Element(ElementData),
    Text(String),
    CData(String),
    /// Comments and processing instructions inside the root
    Other(Event<'static>),
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// A parsed document part
#[derive(Debug, Clone)]
pub struct XmlDocument {
    nodes: Vec<Node>,
    root: NodeId,
    prolog: Vec<Event<'static>>,
    epilogue: Vec<Event<'static>>,
}

fn utf8(bytes: &[u8]) -> Result<String, XmlError> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|e| XmlError::Encoding(e.to_string()))
}

fn element_data(start: &BytesStart, self_closing: bool) -> Result<ElementData, XmlError> {
    let name = utf8(start.name().as_ref())?;
    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| XmlError::Attribute(e.to_string()))?;
        let key = utf8(attr.key.as_ref())?;
        let value = attr.unescape_value()?.into_owned();
        attributes.push((key, value));
    }
    Ok(ElementData {
        name,
        attributes,
        self_closing,
    })
}

impl XmlDocument {
    /// Parse a complete XML document.
    pub fn parse(xml: &str) -> Result<Self, XmlError> {
        let mut reader = Reader::from_str(xml);
        reader.trim_text(false);

        let mut document = Self {
            nodes: Vec::new(),
            root: NodeId::new(0),
            prolog: Vec::new(),
            epilogue: Vec::new(),
        };
        let mut root: Option<NodeId> = None;
        let mut stack: Vec<NodeId> = Vec::new();

        loop {
            let event = reader.read_event()?;
            match event {
                Event::Eof => break,
                Event::Start(ref start) => {
                    let data = element_data(start, false)?;
                    let id = document.attach_new(NodeKind::Element(data), stack.last().copied());
                    if stack.is_empty() {
                        if root.is_some() {
                            return Err(XmlError::MultipleRoots);
                        }
                        root = Some(id);
                    }
                    stack.push(id);
                }
                Event::Empty(ref start) => {
                    let data = element_data(start, true)?;
                    let id = document.attach_new(NodeKind::Element(data), stack.last().copied());
                    if stack.is_empty() {
                        if root.is_some() {
                            return Err(XmlError::MultipleRoots);
                        }
                        root = Some(id);
                    }
                }
                Event::End(_) => {
                    stack.pop();
                }
                Event::Text(ref text) if !stack.is_empty() => {
                    let content = text.unescape()?.into_owned();
                    document.attach_new(NodeKind::Text(content), stack.last().copied());
                }
                Event::CData(ref data) if !stack.is_empty() => {
                    let content = utf8(data)?;
                    document.attach_new(NodeKind::CData(content), stack.last().copied());
                }
                other => {
                    if stack.is_empty() {
                        if root.is_none() {
                            document.prolog.push(other.into_owned());
                        } else {
                            document.epilogue.push(other.into_owned());
                        }
                    } else {
                        document.attach_new(NodeKind::Other(other.into_owned()), stack.last().copied());
                    }
                }
            }
        }

        if let Some(&open) = stack.last() {
            let name = document.name(open).unwrap_or_default().to_string();
            return Err(XmlError::Unclosed(name));
        }

        document.root = root.ok_or(XmlError::MissingRoot)?;
        Ok(document)
    }

    /// Serialize the tree back to XML text.
    pub fn to_xml_string(&self) -> Result<String, XmlError> {
        let mut writer = Writer::new(Vec::new());

        for event in &self.prolog {
            writer
                .write_event(event.clone())
                .map_err(|e| XmlError::Write(e.to_string()))?;
        }
        self.write_node(&mut writer, self.root)?;
        for event in &self.epilogue {
            writer
                .write_event(event.clone())
                .map_err(|e| XmlError::Write(e.to_string()))?;
        }

        String::from_utf8(writer.into_inner()).map_err(|e| XmlError::Encoding(e.to_string()))
    }

    fn write_node(&self, writer: &mut Writer<Vec<u8>>, id: NodeId) -> Result<(), XmlError> {
        let node = &self.nodes[id.index()];
        let event = match &node.kind {
            NodeKind::Element(element) => {
                let mut start = BytesStart::new(element.name.as_str());
                for (key, value) in &element.attributes {
                    start.push_attribute((key.as_str(), value.as_str()));
                }

                if node.children.is_empty() && element.self_closing {
                    Event::Empty(start)
                } else {
                    writer
                        .write_event(Event::Start(start))
                        .map_err(|e| XmlError::Write(e.to_string()))?;
                    for &child in &node.children {
                        self.write_node(writer, child)?;
                    }
                    Event::End(BytesEnd::new(element.name.as_str()))
                }
            }
            NodeKind::Text(text) => Event::Text(BytesText::new(text)),
            NodeKind::CData(text) => Event::CData(BytesCData::new(text.as_str())),
            NodeKind::Other(event) => event.clone(),
        };

        writer
            .write_event(event)
            .map_err(|e| XmlError::Write(e.to_string()))
    }

    fn attach_new(&mut self, kind: NodeKind, parent: Option<NodeId>) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent,
            children: Vec::new(),
        });
        if let Some(parent) = parent {
            self.nodes[parent.index()].children.push(id);
        }
        id
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.index()].parent.take() {
            self.nodes[parent.index()].children.retain(|&child| child != node);
        }
    }

    fn element_mut(&mut self, node: NodeId) -> Option<&mut ElementData> {
        match &mut self.nodes[node.index()].kind {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        for &child in &self.nodes[node.index()].children {
            match &self.nodes[child.index()].kind {
                NodeKind::Text(text) | NodeKind::CData(text) => out.push_str(text),
                NodeKind::Element(_) => self.collect_text(child, out),
                NodeKind::Other(_) => {}
            }
        }
    }

    fn copy_subtree(&mut self, node: NodeId, deep: bool) -> NodeId {
        let kind = self.nodes[node.index()].kind.clone();
        let copy = self.attach_new(kind, None);
        if deep {
            let children = self.nodes[node.index()].children.clone();
            for child in children {
                let child_copy = self.copy_subtree(child, true);
                self.nodes[child_copy.index()].parent = Some(copy);
                self.nodes[copy.index()].children.push(child_copy);
            }
        }
        copy
    }
}

impl std::str::FromStr for XmlDocument {
    type Err = XmlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl ElementTree for XmlDocument {
    fn root(&self) -> NodeId {
        self.root
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.index()).and_then(|n| n.parent)
    }

    fn name(&self, node: NodeId) -> Option<&str> {
        match &self.nodes.get(node.index())?.kind {
            NodeKind::Element(element) => Some(element.name.as_str()),
            _ => None,
        }
    }

    fn child_nodes(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes
            .get(node.index())
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    fn get_attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        match &self.nodes.get(node.index())?.kind {
            NodeKind::Element(element) => element
                .attributes
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str()),
            _ => None,
        }
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(element) = self.element_mut(node) {
            match element.attributes.iter_mut().find(|(key, _)| key == name) {
                Some((_, existing)) => *existing = value.to_string(),
                None => element.attributes.push((name.to_string(), value.to_string())),
            }
        }
    }

    fn text_content(&self, node: NodeId) -> String {
        let mut text = String::new();
        self.collect_text(node, &mut text);
        text
    }

    fn set_text_content(&mut self, node: NodeId, text: &str) {
        if self.element_mut(node).is_none() {
            return;
        }
        for child in std::mem::take(&mut self.nodes[node.index()].children) {
            self.nodes[child.index()].parent = None;
        }
        if !text.is_empty() {
            self.attach_new(NodeKind::Text(text.to_string()), Some(node));
        }
    }

    fn replace_child(&mut self, parent: NodeId, old: NodeId, replacements: &[NodeId]) -> bool {
        let Some(position) = self.nodes[parent.index()]
            .children
            .iter()
            .position(|&child| child == old)
        else {
            return false;
        };

        self.detach(old);
        for (offset, &replacement) in replacements.iter().enumerate() {
            self.insert_child(parent, position + offset, replacement);
        }
        true
    }

    fn clone_element(&mut self, node: NodeId, deep: bool) -> NodeId {
        self.copy_subtree(node, deep)
    }

    fn create_element(&mut self, name: &str) -> NodeId {
        self.attach_new(
            NodeKind::Element(ElementData {
                name: name.to_string(),
                attributes: Vec::new(),
                self_closing: true,
            }),
            None,
        )
    }

    fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) {
        self.detach(child);
        let children = &mut self.nodes[parent.index()].children;
        let index = index.min(children.len());
        children.insert(index, child);
        self.nodes[child.index()].parent = Some(parent);
    }
}
