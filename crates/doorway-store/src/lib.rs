//! On-disk formats: the walk graph (JSON source + bincode cache), WKT
//! building/entrance layers and the entrance-node table.

pub mod catalog_file;
pub mod graph_file;
pub mod layers;

pub use catalog_file::{load_catalog, read_entrance_nodes, write_entrance_nodes};
pub use graph_file::{load_graph, load_graph_cache, parse_graph, read_graph, save_graph_cache};
pub use layers::{parse_buildings, parse_entrances, read_buildings, read_entrances};
