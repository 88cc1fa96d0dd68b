//! # EdgeList
//!
//! A flow problem is a header line `vertices edges source target` followed
//! by `edges` non-comment lines `from to capacity`. Vertex ids in the text
//! are 1-based and translated to the 0-based ids of [`FlowNetwork`].
//! Blank lines and lines starting with a comment identifier are skipped.
//! The announced vertex count is capped (see [`DEFAULT_MAX_VERTICES`])
//! before anything is allocated for it.
//!
//! The flow report is the maximum flow value on its own line followed by
//! one `from to flow` line (1-based) per edge with positive net flow.

use std::io::{self, BufRead, Write};

use thiserror::Error;

use crate::algorithm::graph::max_flow::{FlowAssignment, FlowError, FlowNetwork};
use crate::algorithm::traits::{Capacity, Flow, NodeId};

/// Failure to read a flow problem
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("header not found")]
    MissingHeader,
    #[error("line {line}: {reason}")]
    Malformed { line: usize, reason: String },
    #[error("line {line}: vertex id {id} outside 1..={vertex_count}")]
    VertexOutOfRange {
        line: usize,
        id: usize,
        vertex_count: usize,
    },
    #[error("header announces {expected} edges, found {found}")]
    EdgeCount { expected: usize, found: usize },
    #[error("line {line}: {source}")]
    Network {
        line: usize,
        #[source]
        source: FlowError,
    },
}

/// Largest vertex count the default reader accepts
pub const DEFAULT_MAX_VERTICES: usize = 1 << 24;

/// Reader for the edge-list format
#[derive(Debug, Clone)]
pub struct EdgeListReader {
    /// Lines starting with any of these are skipped
    comment_identifiers: Vec<String>,
    max_vertices: usize,
}

impl Default for EdgeListReader {
    fn default() -> Self {
        Self {
            comment_identifiers: vec!["c".to_string(), "#".to_string()],
            max_vertices: DEFAULT_MAX_VERTICES,
        }
    }
}

impl EdgeListReader {
    /// Creates a new (default) reader
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the comment identifiers
    pub fn comment_identifier<S: Into<String>>(mut self, c: S) -> EdgeListReader {
        self.comment_identifiers = vec![c.into()];
        self
    }

    /// Replaces the vertex count limit
    pub fn max_vertices(mut self, limit: usize) -> EdgeListReader {
        self.max_vertices = limit;
        self
    }

    fn is_skipped(&self, line: &str) -> bool {
        line.is_empty()
            || self
                .comment_identifiers
                .iter()
                .any(|identifier| line.starts_with(identifier.as_str()))
    }

    /// Reads a complete network; duplicate edges are ignored like [`FlowNetwork::add_edge`]
    pub fn try_read_network<R: BufRead>(&self, reader: R) -> Result<FlowNetwork, ParseError> {
        let mut lines = reader
            .lines()
            .enumerate()
            .map(|(index, line)| line.map(|text| (index + 1, text)));

        let mut next_content_line = || -> Result<Option<(usize, String)>, ParseError> {
            for entry in lines.by_ref() {
                let (number, text) = entry?;
                let trimmed = text.trim();
                if !self.is_skipped(trimmed) {
                    return Ok(Some((number, trimmed.to_string())));
                }
            }
            Ok(None)
        };

        let (header_line, header) = next_content_line()?.ok_or(ParseError::MissingHeader)?;
        let [vertex_count, expected_edges, source, target] =
            fields::<4>(header_line, &header)?.map(|token| parse_token::<usize>(header_line, token));
        let (vertex_count, expected_edges, source, target) = (vertex_count?, expected_edges?, source?, target?);
        if vertex_count > self.max_vertices {
            return Err(ParseError::Malformed {
                line: header_line,
                reason: format!("vertex count {} exceeds the limit {}", vertex_count, self.max_vertices),
            });
        }
        let source = to_node(header_line, source, vertex_count)?;
        let target = to_node(header_line, target, vertex_count)?;

        let mut network = FlowNetwork::new(vertex_count, source, target).map_err(|source| ParseError::Network {
            line: header_line,
            source,
        })?;

        let mut found = 0;
        while let Some((line, text)) = next_content_line()? {
            let [from, to, capacity] = fields::<3>(line, &text)?;
            let from = to_node(line, parse_token(line, from)?, vertex_count)?;
            let to = to_node(line, parse_token(line, to)?, vertex_count)?;
            let capacity: Capacity = parse_token(line, capacity)?;
            network
                .add_edge(from, to, capacity)
                .map_err(|source| ParseError::Network { line, source })?;
            found += 1;
        }

        if found != expected_edges {
            return Err(ParseError::EdgeCount {
                expected: expected_edges,
                found,
            });
        }
        Ok(network)
    }
}

/// Reads a network with the default reader settings
pub fn read_network<R: BufRead>(reader: R) -> Result<FlowNetwork, ParseError> {
    EdgeListReader::default().try_read_network(reader)
}

/// Writes the flow value and the per-edge net flows with 1-based ids
pub fn write_flow<W: Write>(mut writer: W, max_flow: Flow, assignments: &[FlowAssignment]) -> io::Result<()> {
    writeln!(writer, "{}", max_flow)?;
    for assignment in assignments {
        writeln!(
            writer,
            "{} {} {}",
            assignment.from + 1,
            assignment.to + 1,
            assignment.flow
        )?;
    }
    writer.flush()
}

/// Exactly `N` whitespace-separated fields
fn fields<const N: usize>(line: usize, text: &str) -> Result<[&str; N], ParseError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let found = tokens.len();
    tokens.try_into().map_err(|_| ParseError::Malformed {
        line,
        reason: format!("expected {} fields, found {}", N, found),
    })
}

fn parse_token<T: std::str::FromStr>(line: usize, token: &str) -> Result<T, ParseError> {
    token.parse::<T>().map_err(|_| ParseError::Malformed {
        line,
        reason: format!("invalid number '{}'", token),
    })
}

/// 1-based id to 0-based vertex
fn to_node(line: usize, id: usize, vertex_count: usize) -> Result<NodeId, ParseError> {
    if id == 0 || id > vertex_count {
        return Err(ParseError::VertexOutOfRange { line, id, vertex_count });
    }
    Ok(id - 1)
}
