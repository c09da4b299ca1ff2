pub mod graph;
pub mod layer;
pub mod unique_set;

pub use graph::{precompute_hex_layers, HexLayerGraph, LayerHandle};
pub use layer::{hex_layer, hex_layer_batch4, Config, CONFIG_COUNT};
