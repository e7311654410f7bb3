//! Writer für OSM-XML (API 0.6).

use crate::core::{MapDataset, Tags};
use anyhow::Result;
use std::fmt::Write;

/// Nachkommastellen für Koordinaten (OSM-Genauigkeit, ca. 1 cm)
const COORD_DECIMALS: usize = 7;

/// Schreibt einen Datensatz als OSM-XML.
///
/// Nodes und Ways erscheinen in Datensatz-Reihenfolge; neu erzeugte
/// Primitive behalten ihre negativen IDs.
pub fn write_osm(map: &MapDataset) -> Result<String> {
    let mut output = String::new();
    output.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    output.push_str("<osm version=\"0.6\" generator=\"roundabout_expander\">\n");

    for node in map.nodes_iter() {
        write!(
            output,
            "  <node id=\"{}\" lat=\"{:.prec$}\" lon=\"{:.prec$}\"",
            node.id.0,
            node.coord.lat,
            node.coord.lon,
            prec = COORD_DECIMALS
        )?;
        if node.tags.is_empty() {
            output.push_str("/>\n");
        } else {
            output.push_str(">\n");
            write_tags(&mut output, &node.tags)?;
            output.push_str("  </node>\n");
        }
    }

    for way in map.ways_iter() {
        writeln!(output, "  <way id=\"{}\">", way.id.0)?;
        for node in &way.nodes {
            writeln!(output, "    <nd ref=\"{}\"/>", node.0)?;
        }
        write_tags(&mut output, &way.tags)?;
        output.push_str("  </way>\n");
    }

    output.push_str("</osm>\n");
    log::debug!(
        "OSM-Export: {} Nodes, {} Ways",
        map.node_count(),
        map.way_count()
    );
    Ok(output)
}

fn write_tags(output: &mut String, tags: &Tags) -> std::fmt::Result {
    for (key, value) in tags {
        writeln!(
            output,
            "    <tag k=\"{}\" v=\"{}\"/>",
            escape_xml(key),
            escape_xml(value)
        )?;
    }
    Ok(())
}

fn escape_xml(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{tags_from, LatLon, MapNode, MapWay, NodeId, WayId};

    #[test]
    fn test_escape_und_struktur() {
        let mut map = MapDataset::new();
        map.add_node(MapNode::with_tags(
            NodeId(-1),
            LatLon::new(51.5, 7.25),
            tags_from([("name", "A \"&\" <B>")]),
        ));
        map.add_node(MapNode::new(NodeId(2), LatLon::new(51.5001, 7.25)));
        map.add_way(MapWay::new(WayId(-3), vec![NodeId(-1), NodeId(2)]))
            .unwrap();

        let xml = write_osm(&map).unwrap();
        assert!(xml.contains("<node id=\"-1\" lat=\"51.5000000\" lon=\"7.2500000\">"));
        assert!(xml.contains("v=\"A &quot;&amp;&quot; &lt;B&gt;\""));
        assert!(xml.contains("<node id=\"2\" lat=\"51.5001000\" lon=\"7.2500000\"/>"));
        assert!(xml.contains("<way id=\"-3\">\n    <nd ref=\"-1\"/>\n    <nd ref=\"2\"/>\n  </way>"));
    }
}
