//! Text input and output of flow problems
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod edge_list;

pub use self::edge_list::{read_network, write_flow, EdgeListReader, ParseError, DEFAULT_MAX_VERTICES};
