//! XML road-network loader, enabled with the `xml` Cargo feature.
//!
//! # Format
//!
//! ```xml
//! <graph>
//!   <node id="1"><lat>51.5007</lat><lon>-0.1246</lon></node>
//!   <node id="2" lat="51.5010" lon="-0.1300"/>
//!   <way id="100"><node>1</node><node>2</node></way>
//! </graph>
//! ```
//!
//! The root element name is ignored.  Coordinates may be given as child
//! elements or as `lat`/`lon` attributes.  Every way must list exactly two
//! node references; its cost is derived from the haversine length and the
//! configured bot speed (see [`RoadNetworkBuilder::add_way`]).
//!
//! # Usage
//!
//! ```ignore
//! use std::path::Path;
//! use rgdt_spatial::xml::load_network_xml;
//!
//! let network = load_network_xml(Path::new("city.xml"), 40.0)?;
//! ```

use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use rgdt_core::{GeoPoint, NodeId, WayId};

use crate::network::{RoadNetwork, RoadNetworkBuilder};
use crate::{SpatialError, SpatialResult};

// ── Public entry points ───────────────────────────────────────────────────────

/// Load a road network from an XML file.
///
/// # Errors
///
/// [`SpatialError::Io`] on file errors, [`SpatialError::Xml`] on syntax
/// errors, [`SpatialError::MalformedGraph`] for missing coordinates, bad ids
/// or dangling way references.
pub fn load_network_xml(path: &Path, bot_speed_kmph: f64) -> SpatialResult<RoadNetwork> {
    let text = std::fs::read_to_string(path)?;
    load_network_xml_str(&text, bot_speed_kmph)
}

/// Like [`load_network_xml`] but parses an in-memory document.
pub fn load_network_xml_str(xml: &str, bot_speed_kmph: f64) -> SpatialResult<RoadNetwork> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut builder = RoadNetworkBuilder::new(bot_speed_kmph);
    let mut scope   = Scope::Root;
    let mut field   = Field::None;

    loop {
        let event = reader.read_event().map_err(xml_err)?;
        match event {
            Event::Start(e) => {
                match (e.name().as_ref(), scope.kind()) {
                    (b"node", ScopeKind::Root) => {
                        scope = Scope::Node(PendingNode::open(&e)?);
                    }
                    (b"node", ScopeKind::Way) => field = Field::WayRef,
                    (b"lat", ScopeKind::Node) => field = Field::Lat,
                    (b"lon", ScopeKind::Node) => field = Field::Lon,
                    (b"way", ScopeKind::Root) => {
                        let id = WayId(required_id(&e, "way")?);
                        scope = Scope::Way(PendingWay { id, refs: Vec::new() });
                    }
                    _ => {}
                }
            }

            Event::Empty(e) => {
                match (e.name().as_ref(), scope.kind()) {
                    (b"node", ScopeKind::Root) => {
                        PendingNode::open(&e)?.finish(&mut builder)?;
                    }
                    (b"way", ScopeKind::Root) => {
                        let id = required_id(&e, "way")?;
                        return Err(malformed(format!("way {id} has no node references")));
                    }
                    _ => {}
                }
            }

            Event::Text(t) => {
                let text = t.unescape().map_err(xml_err)?;
                match (&field, &mut scope) {
                    (Field::Lat, Scope::Node(node)) => node.lat = Some(parse_coord(&text, node.id, "lat")?),
                    (Field::Lon, Scope::Node(node)) => node.lon = Some(parse_coord(&text, node.id, "lon")?),
                    (Field::WayRef, Scope::Way(way)) => {
                        let r = text.trim().parse::<u64>().map_err(|_| {
                            malformed(format!("way {} has invalid node reference {text:?}", way.id))
                        })?;
                        way.refs.push(NodeId(r));
                    }
                    _ => {}
                }
            }

            Event::End(e) => {
                match e.name().as_ref() {
                    b"lat" | b"lon" => field = Field::None,
                    b"node" if field == Field::WayRef => field = Field::None,
                    b"node" => {
                        if let Scope::Node(node) = std::mem::replace(&mut scope, Scope::Root) {
                            node.finish(&mut builder)?;
                        }
                    }
                    b"way" => {
                        if let Scope::Way(way) = std::mem::replace(&mut scope, Scope::Root) {
                            let [a, b] = way.refs[..] else {
                                return Err(malformed(format!(
                                    "way {} must reference exactly two nodes, found {}",
                                    way.id,
                                    way.refs.len()
                                )));
                            };
                            builder.add_way(way.id, a, b);
                        }
                    }
                    _ => {}
                }
            }

            Event::Eof => break,
            _ => {}
        }
    }

    builder.build()
}

// ── Parser state ──────────────────────────────────────────────────────────────

enum Scope {
    Root,
    Node(PendingNode),
    Way(PendingWay),
}

#[derive(Copy, Clone)]
enum ScopeKind {
    Root,
    Node,
    Way,
}

impl Scope {
    fn kind(&self) -> ScopeKind {
        match self {
            Scope::Root    => ScopeKind::Root,
            Scope::Node(_) => ScopeKind::Node,
            Scope::Way(_)  => ScopeKind::Way,
        }
    }
}

#[derive(PartialEq, Eq)]
enum Field {
    None,
    Lat,
    Lon,
    WayRef,
}

struct PendingNode {
    id:  NodeId,
    lat: Option<f64>,
    lon: Option<f64>,
}

impl PendingNode {
    /// Start a node from its opening tag, picking up attribute coordinates.
    fn open(e: &BytesStart<'_>) -> SpatialResult<Self> {
        let id = NodeId(required_id(e, "node")?);
        let lat = attr(e, "lat")?.map(|v| parse_coord(&v, id, "lat")).transpose()?;
        let lon = attr(e, "lon")?.map(|v| parse_coord(&v, id, "lon")).transpose()?;
        Ok(Self { id, lat, lon })
    }

    fn finish(self, builder: &mut RoadNetworkBuilder) -> SpatialResult<()> {
        let lat = self.lat.ok_or_else(|| malformed(format!("node {} has no latitude", self.id)))?;
        let lon = self.lon.ok_or_else(|| malformed(format!("node {} has no longitude", self.id)))?;
        builder.add_node(self.id, GeoPoint::new(lat, lon));
        Ok(())
    }
}

struct PendingWay {
    id:   WayId,
    refs: Vec<NodeId>,
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn attr(e: &BytesStart<'_>, name: &str) -> SpatialResult<Option<String>> {
    match e.try_get_attribute(name).map_err(xml_err)? {
        Some(a) => Ok(Some(a.unescape_value().map_err(xml_err)?.into_owned())),
        None    => Ok(None),
    }
}

fn required_id(e: &BytesStart<'_>, element: &str) -> SpatialResult<u64> {
    let raw = attr(e, "id")?
        .ok_or_else(|| malformed(format!("<{element}> without an id attribute")))?;
    raw.trim()
        .parse::<u64>()
        .map_err(|_| malformed(format!("<{element}> has invalid id {raw:?}")))
}

fn parse_coord(text: &str, node: NodeId, what: &str) -> SpatialResult<f64> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| malformed(format!("node {node} has invalid {what} {text:?}")))
}

fn malformed(msg: String) -> SpatialError {
    SpatialError::MalformedGraph(msg)
}

fn xml_err(e: impl std::fmt::Display) -> SpatialError {
    SpatialError::Xml(e.to_string())
}
