//! Parser für OSM-XML (API 0.6): Nodes, Ways und deren Tags.
//!
//! Relationen und Metadaten (`<bounds>`, `<meta>`) werden übersprungen.

use crate::core::{LatLon, MapDataset, MapNode, MapWay, NodeId, Tags, WayId};
use anyhow::{bail, Context, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Element, dessen Kinder (`<tag>`, `<nd>`) gerade gelesen werden
enum OpenElement {
    Node(MapNode),
    Way(MapWay),
    Skipped,
}

/// Parsed einen OSM-Datensatz aus einem XML-String.
///
/// Ways werden erst nach allen Nodes eingefügt; ein Way mit Verweis auf
/// einen unbekannten Node bricht den Import ab.
pub fn parse_osm(xml_content: &str) -> Result<MapDataset> {
    let mut reader = Reader::from_str(xml_content);
    reader.config_mut().trim_text(true);

    let mut buffer = Vec::new();
    let mut map = MapDataset::new();
    let mut ways: Vec<MapWay> = Vec::new();
    let mut open: Option<OpenElement> = None;
    let mut saw_root = false;
    let mut skipped_relations = 0usize;

    loop {
        match reader.read_event_into(&mut buffer) {
            Ok(Event::Start(ref e)) => {
                let name = e.name();
                let tag = reader.decoder().decode(name.as_ref())?;
                match &*tag {
                    "osm" => saw_root = true,
                    "node" => open = Some(OpenElement::Node(parse_node(&reader, e)?)),
                    "way" => open = Some(OpenElement::Way(parse_way_head(&reader, e)?)),
                    "relation" => {
                        skipped_relations += 1;
                        open = Some(OpenElement::Skipped);
                    }
                    _ => {}
                }
            }
            Ok(Event::Empty(ref e)) => {
                let name = e.name();
                let tag = reader.decoder().decode(name.as_ref())?;
                match &*tag {
                    "node" => map.add_node(parse_node(&reader, e)?),
                    "way" => ways.push(parse_way_head(&reader, e)?),
                    "relation" => skipped_relations += 1,
                    "tag" => {
                        let (key, value) = parse_tag(&reader, e)?;
                        match open.as_mut() {
                            Some(OpenElement::Node(node)) => {
                                node.tags.insert(key, value);
                            }
                            Some(OpenElement::Way(way)) => {
                                way.tags.insert(key, value);
                            }
                            _ => {}
                        }
                    }
                    "nd" => {
                        if let Some(OpenElement::Way(way)) = open.as_mut() {
                            let node_ref = required_attr(&reader, e, "ref")?;
                            let id = node_ref.parse::<i64>().with_context(|| {
                                format!("Ungültige nd-Referenz '{}' in {}", node_ref, way.id)
                            })?;
                            way.nodes.push(NodeId(id));
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::End(ref e)) => {
                let name = e.name();
                let tag = reader.decoder().decode(name.as_ref())?;
                if matches!(&*tag, "node" | "way" | "relation") {
                    match open.take() {
                        Some(OpenElement::Node(node)) => map.add_node(node),
                        Some(OpenElement::Way(way)) => ways.push(way),
                        _ => {}
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(err) => return Err(err).context("Fehler beim Parsen des XML"),
            _ => {}
        }

        buffer.clear();
    }

    if !saw_root {
        bail!("Kein <osm>-Wurzelelement gefunden");
    }

    for way in ways {
        let id = way.id;
        if way.nodes.is_empty() {
            log::warn!("{} ohne Nodes wird übersprungen", id);
            continue;
        }
        map.add_way(way)
            .with_context(|| format!("{} verweist auf unbekannte Nodes", id))?;
    }

    if skipped_relations > 0 {
        log::debug!("{} Relationen übersprungen", skipped_relations);
    }
    log::info!(
        "OSM geladen: {} Nodes, {} Ways",
        map.node_count(),
        map.way_count()
    );
    Ok(map)
}

fn parse_node(reader: &Reader<&[u8]>, e: &BytesStart<'_>) -> Result<MapNode> {
    let raw_id = required_attr(reader, e, "id")?;
    let id: i64 = raw_id
        .parse()
        .with_context(|| format!("Ungültige Node-ID '{}'", raw_id))?;
    let lat: f64 = required_attr(reader, e, "lat")?
        .parse()
        .with_context(|| format!("Ungültige Breite an Node {}", id))?;
    let lon: f64 = required_attr(reader, e, "lon")?
        .parse()
        .with_context(|| format!("Ungültige Länge an Node {}", id))?;
    Ok(MapNode::with_tags(NodeId(id), LatLon::new(lat, lon), Tags::new()))
}

fn parse_way_head(reader: &Reader<&[u8]>, e: &BytesStart<'_>) -> Result<MapWay> {
    let raw_id = required_attr(reader, e, "id")?;
    let id: i64 = raw_id
        .parse()
        .with_context(|| format!("Ungültige Way-ID '{}'", raw_id))?;
    Ok(MapWay::new(WayId(id), Vec::new()))
}

fn parse_tag(reader: &Reader<&[u8]>, e: &BytesStart<'_>) -> Result<(String, String)> {
    Ok((required_attr(reader, e, "k")?, required_attr(reader, e, "v")?))
}

fn required_attr(reader: &Reader<&[u8]>, e: &BytesStart<'_>, wanted: &str) -> Result<String> {
    for attr in e.attributes().with_checks(false) {
        let attr = attr?;
        let key = reader.decoder().decode(attr.key.as_ref())?;
        if key == wanted {
            return Ok(attr.unescape_value()?.into_owned());
        }
    }
    let element = reader.decoder().decode(e.name().as_ref())?.into_owned();
    bail!("Attribut '{}' fehlt an <{}>", wanted, element)
}
