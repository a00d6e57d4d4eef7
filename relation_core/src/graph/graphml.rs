//! GraphML export.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Write;

use super::RelationGraph;

const GRAPHML_NS: &str = "http://graphml.graphdrawing.org/xmlns";

/// File name for a play's final graph export.
pub fn graphml_file_name(play_title: &str) -> String {
    format!("{play_title}.graphml")
}

impl RelationGraph {
    /// Write the graph as a GraphML document with an integer `weight` edge attribute.
    ///
    /// Node ids are the canonical character names.
    pub fn write_graphml<W: Write>(&self, writer: W) -> Result<(), quick_xml::Error> {
        let mut xml = Writer::new_with_indent(writer, b' ', 2);

        xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        xml.write_event(Event::Start(
            BytesStart::new("graphml").with_attributes([("xmlns", GRAPHML_NS)]),
        ))?;
        xml.write_event(Event::Empty(BytesStart::new("key").with_attributes([
            ("id", "weight"),
            ("for", "edge"),
            ("attr.name", "weight"),
            ("attr.type", "long"),
        ])))?;
        xml.write_event(Event::Start(
            BytesStart::new("graph").with_attributes([("edgedefault", "directed")]),
        ))?;

        for name in self.names() {
            xml.write_event(Event::Empty(
                BytesStart::new("node").with_attributes([("id", name)]),
            ))?;
        }

        for (source, target, weight) in self.edges() {
            xml.write_event(Event::Start(
                BytesStart::new("edge").with_attributes([("source", source), ("target", target)]),
            ))?;
            xml.write_event(Event::Start(
                BytesStart::new("data").with_attributes([("key", "weight")]),
            ))?;
            xml.write_event(Event::Text(BytesText::new(&weight.to_string())))?;
            xml.write_event(Event::End(BytesEnd::new("data")))?;
            xml.write_event(Event::End(BytesEnd::new("edge")))?;
        }

        xml.write_event(Event::End(BytesEnd::new("graph")))?;
        xml.write_event(Event::End(BytesEnd::new("graphml")))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relations::{RelationCounts, RelationPair};

    fn render(graph: &RelationGraph) -> String {
        let mut buffer = Vec::new();
        graph.write_graphml(&mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_graphml_file_name() {
        assert_eq!(graphml_file_name("Macbeth"), "Macbeth.graphml");
    }

    #[test]
    fn test_write_graphml() {
        let counts: RelationCounts<RelationPair> =
            [(RelationPair::new("Ophelia", "Hamlet"), 2)].into_iter().collect();
        let xml = render(&RelationGraph::from_counts(&counts));

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<graph edgedefault=\"directed\">"));
        assert!(xml.contains("<node id=\"Hamlet\"/>"));
        assert!(xml.contains("<node id=\"Ophelia\"/>"));
        assert!(xml.contains("<edge source=\"Hamlet\" target=\"Ophelia\">"));
        assert!(xml.contains("<data key=\"weight\">2</data>"));
    }

    #[test]
    fn test_write_graphml_escapes_names() {
        let counts: RelationCounts<RelationPair> =
            [(RelationPair::new("Romeo & Co", "Juliet"), 1)].into_iter().collect();
        let xml = render(&RelationGraph::from_counts(&counts));

        assert!(xml.contains("Romeo &amp; Co"));
        assert!(!xml.contains("Romeo & Co"));
    }

    #[test]
    fn test_write_empty_graph() {
        let xml = render(&RelationGraph::new());
        assert!(!xml.contains("<node"));
        assert!(xml.contains("</graphml>"));
    }
}
