//! Text providers for the line-based adjacency-list and ground-truth files
//! consumed by the partitioner.
//!
//! Adjacency files hold one vertex per non-blank line. The first token of a
//! line is a label and is ignored; the remaining whitespace-separated tokens
//! are the neighbour ids. Ground-truth files hold one Sybil vertex id per
//! non-blank line. Any token that is not a non-negative integer fails the
//! whole read.

use std::io::{self, BufRead};

use sybilcut_core::{EdgeDirection, Graph, SybilGroundTruth, VertexId};
use thiserror::Error;

/// Errors produced while reading text inputs.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TextProviderError {
    /// Reading from the underlying source failed.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// A neighbour token in an adjacency file was not a vertex id.
    #[error("line {line}: `{token}` is not a vertex id")]
    MalformedAdjacency {
        /// One-based line number in the source.
        line: usize,
        /// The offending token.
        token: String,
    },
    /// A ground-truth line was not a vertex id.
    #[error("line {line}: `{value}` is not a vertex id")]
    MalformedGroundTruth {
        /// One-based line number in the source.
        line: usize,
        /// The offending line, trimmed.
        value: String,
    },
    /// The adjacency source contained no vertices.
    #[error("adjacency list contains no vertices")]
    EmptyInput,
}

/// Visits every non-blank line of `reader` with its one-based line number.
fn for_each_content_line<R, F>(reader: R, mut visit: F) -> Result<(), TextProviderError>
where
    R: BufRead,
    F: FnMut(usize, &str) -> Result<(), TextProviderError>,
{
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let content = line.trim();
        if content.is_empty() {
            continue;
        }
        visit(index + 1, content)?;
    }
    Ok(())
}

/// Graph loaded from an adjacency-list file.
#[derive(Clone, Debug)]
pub struct AdjacencyListProvider {
    name: String,
    graph: Graph,
}

impl AdjacencyListProvider {
    /// Parses an adjacency list from `reader`.
    ///
    /// The n-th non-blank line describes vertex `n - 1`. Edges are inserted
    /// undirected, so a neighbour listed on only one side still yields a
    /// symmetric graph.
    ///
    /// # Errors
    /// Returns [`TextProviderError::Io`] if reading fails,
    /// [`TextProviderError::MalformedAdjacency`] for a token that is not a
    /// vertex id and [`TextProviderError::EmptyInput`] when no vertex lines
    /// are present.
    ///
    /// # Examples
    /// ```
    /// use std::io::Cursor;
    /// use sybilcut_providers_text::AdjacencyListProvider;
    ///
    /// let raw = "a 1 2\nb 0\nc 0\n";
    /// let provider = AdjacencyListProvider::try_from_reader("demo", Cursor::new(raw))?;
    /// assert_eq!(provider.name(), "demo");
    /// assert_eq!(provider.graph().vertex_count(), 3);
    /// assert_eq!(provider.graph().edge_count(), 2);
    /// # Ok::<(), sybilcut_providers_text::TextProviderError>(())
    /// ```
    pub fn try_from_reader<R: BufRead>(
        name: impl Into<String>,
        reader: R,
    ) -> Result<Self, TextProviderError> {
        let mut graph = Graph::new();
        let mut vertex: VertexId = 0;
        for_each_content_line(reader, |line, content| {
            graph.add_vertex(vertex);
            for token in content.split_whitespace().skip(1) {
                let neighbour = token.parse::<VertexId>().map_err(|_| {
                    TextProviderError::MalformedAdjacency {
                        line,
                        token: token.to_owned(),
                    }
                })?;
                graph.add_edge(vertex, neighbour, EdgeDirection::Undirected);
            }
            vertex += 1;
            Ok(())
        })?;

        if graph.is_empty() {
            return Err(TextProviderError::EmptyInput);
        }
        Ok(Self {
            name: name.into(),
            graph,
        })
    }

    /// Name the provider was created with.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parsed graph.
    #[must_use]
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Consumes the provider and returns the parsed graph.
    #[must_use]
    pub fn into_graph(self) -> Graph {
        self.graph
    }
}

/// Known Sybil ids loaded from a ground-truth file.
#[derive(Clone, Debug)]
pub struct GroundTruthProvider {
    name: String,
    truth: SybilGroundTruth,
}

impl GroundTruthProvider {
    /// Parses one vertex id per non-blank line. Duplicates collapse.
    ///
    /// # Errors
    /// Returns [`TextProviderError::Io`] if reading fails and
    /// [`TextProviderError::MalformedGroundTruth`] for a line that is not a
    /// vertex id.
    ///
    /// # Examples
    /// ```
    /// use std::io::Cursor;
    /// use sybilcut_providers_text::GroundTruthProvider;
    ///
    /// let provider = GroundTruthProvider::try_from_reader("truth", Cursor::new("7\n\n3\n7\n"))?;
    /// assert_eq!(provider.truth().iter().collect::<Vec<_>>(), vec![3, 7]);
    /// # Ok::<(), sybilcut_providers_text::TextProviderError>(())
    /// ```
    pub fn try_from_reader<R: BufRead>(
        name: impl Into<String>,
        reader: R,
    ) -> Result<Self, TextProviderError> {
        let mut ids = Vec::new();
        for_each_content_line(reader, |line, content| {
            let id = content.parse::<VertexId>().map_err(|_| {
                TextProviderError::MalformedGroundTruth {
                    line,
                    value: content.to_owned(),
                }
            })?;
            ids.push(id);
            Ok(())
        })?;
        Ok(Self {
            name: name.into(),
            truth: SybilGroundTruth::from_ids(ids),
        })
    }

    /// Name the provider was created with.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parsed ground truth.
    #[must_use]
    pub fn truth(&self) -> &SybilGroundTruth {
        &self.truth
    }

    /// Consumes the provider and returns the parsed ground truth.
    #[must_use]
    pub fn into_truth(self) -> SybilGroundTruth {
        self.truth
    }
}
