// SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later

//! File formats for the `gexpm` CLI: a plain-text edge list for graphs, a
//! one-1-based-index-per-line seed file, and one-`f64`-per-line output
//! vectors. The output writer is grounded on `cli/src/rank/pagerank.rs`'s
//! `load_f64_vector`/`FloatVectorFormat::store` pair.

use anyhow::{Context, Result};
use gexpm_graph::{Csr, CsrBuilder};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

/// Loads a graph from a plain-text edge list, one arc per line: `u v` or
/// `u v w`. Node indices are converted from 1-based to 0-based when
/// `one_based` is set. Lines that are blank or start with `#` are skipped.
///
/// The node count is inferred as one more than the largest index seen, since
/// the format carries no explicit header.
pub fn load_graph(path: impl AsRef<Path>, one_based: bool) -> Result<Csr> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .with_context(|| format!("could not open graph file {}", path.display()))?;
    let reader = BufReader::new(file);

    let mut arcs = Vec::new();
    let mut num_nodes = 0usize;
    for (lineno, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("error reading line {} of {}", lineno + 1, path.display()))?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut fields = line.split_whitespace();
        let u: usize = fields
            .next()
            .with_context(|| format!("missing source column on line {} of {}", lineno + 1, path.display()))?
            .parse()
            .with_context(|| format!("invalid source column on line {} of {}", lineno + 1, path.display()))?;
        let v: usize = fields
            .next()
            .with_context(|| format!("missing target column on line {} of {}", lineno + 1, path.display()))?
            .parse()
            .with_context(|| format!("invalid target column on line {} of {}", lineno + 1, path.display()))?;
        let w: f64 = match fields.next() {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("invalid weight column on line {} of {}", lineno + 1, path.display()))?,
            None => 1.0,
        };
        let (u, v) = if one_based {
            anyhow::ensure!(u >= 1 && v >= 1, "line {} of {}: 1-based indices must be >= 1", lineno + 1, path.display());
            (u - 1, v - 1)
        } else {
            (u, v)
        };
        num_nodes = num_nodes.max(u + 1).max(v + 1);
        arcs.push((u, v, w));
    }

    let mut builder = CsrBuilder::new(num_nodes);
    for (u, v, w) in arcs {
        builder.add_arc(u, v, w)?;
    }
    Ok(builder.build())
}

/// Reads a text file containing one 1-based node index per line, returning
/// 0-based indices.
pub fn load_seeds(path: impl AsRef<Path>) -> Result<Vec<usize>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .with_context(|| format!("could not open seeds file {}", path.display()))?;
    let reader = BufReader::new(file);
    reader
        .lines()
        .enumerate()
        .filter_map(|(i, line)| {
            let line = match line {
                Ok(l) => l,
                Err(e) => return Some(Err(e.into())),
            };
            let trimmed = line.trim();
            if trimmed.is_empty() {
                return None;
            }
            let parsed = trimmed
                .parse::<usize>()
                .with_context(|| format!("error parsing line {} of {}: {:?}", i + 1, path.display(), line))
                .and_then(|one_based| {
                    anyhow::ensure!(
                        one_based >= 1,
                        "line {} of {}: 1-based seed index must be >= 1, got 0",
                        i + 1,
                        path.display()
                    );
                    Ok(one_based - 1)
                });
            Some(parsed)
        })
        .collect()
}

/// Writes a dense vector as one `f64` per line, in node order.
pub fn write_vector(path: impl AsRef<Path>, values: &[f64]) -> Result<()> {
    let path = path.as_ref();
    let file = std::fs::File::create(path)
        .with_context(|| format!("could not create output file {}", path.display()))?;
    let mut writer = std::io::BufWriter::new(file);
    for v in values {
        writeln!(writer, "{v}").with_context(|| format!("error writing to {}", path.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f
    }

    #[test]
    fn loads_zero_based_unweighted_edge_list() {
        let f = write_temp("0 1\n1 0\n");
        let g = load_graph(f.path(), false).unwrap();
        assert_eq!(g.num_nodes(), 2);
        assert_eq!(g.successors(0), &[1]);
        assert_eq!(g.successors(1), &[0]);
    }

    #[test]
    fn loads_one_based_weighted_edge_list_and_skips_comments() {
        let f = write_temp("# a triangle\n1 2 0.5\n2 3 1.5\n3 1 2.0\n");
        let g = load_graph(f.path(), true).unwrap();
        assert_eq!(g.num_nodes(), 3);
        assert_eq!(g.weights(0), &[0.5]);
        assert_eq!(g.successors(0), &[1]);
    }

    #[test]
    fn loads_seeds_as_one_based_converted_to_zero_based() {
        let f = write_temp("1\n3\n\n2\n");
        let seeds = load_seeds(f.path()).unwrap();
        assert_eq!(seeds, vec![0, 2, 1]);
    }

    #[test]
    fn rejects_a_zero_seed_instead_of_underflowing() {
        let f = write_temp("1\n0\n");
        assert!(load_seeds(f.path()).is_err());
    }

    #[test]
    fn writes_one_value_per_line() {
        let out = tempfile::NamedTempFile::new().unwrap();
        write_vector(out.path(), &[1.0, 2.5, -3.0]).unwrap();
        let contents = std::fs::read_to_string(out.path()).unwrap();
        assert_eq!(contents, "1\n2.5\n-3\n");
    }
}
