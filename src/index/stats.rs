use crate::index::trie::TrieIndex;
use anyhow::Result;
use std::path::Path;

/// Summary counts for an index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndexStats {
    /// Live trie nodes, root included
    pub nodes: usize,
    /// Tokens resolving to at least one document
    pub tokens: usize,
    /// Distinct document ids
    pub documents: usize,
    /// Sum over tokens of the number of documents holding them
    pub postings: usize,
}

impl IndexStats {
    pub fn collect(index: &TrieIndex) -> Self {
        let tokens = index.tokens();
        Self {
            nodes: index.node_count(),
            tokens: tokens.len(),
            documents: index.documents().len(),
            postings: tokens.iter().map(|(_, ids)| ids.len()).sum(),
        }
    }
}

/// Display index statistics for a snapshot file
pub fn show_stats(index: &TrieIndex, snapshot_path: &Path) -> Result<()> {
    let stats = IndexStats::collect(index);

    println!("Index Statistics");
    println!("================");
    println!();
    println!("Snapshot:         {}", snapshot_path.display());
    println!("Documents:        {}", stats.documents);
    println!("Tokens:           {}", stats.tokens);
    println!("Postings:         {}", stats.postings);
    println!("Trie nodes:       {}", stats.nodes);

    if let Ok(meta) = std::fs::metadata(snapshot_path) {
        println!();
        println!("Snapshot size:    {}", format_size(meta.len()));
    }

    let tokens = index.tokens();
    if !tokens.is_empty() {
        println!();
        println!("Most common tokens:");
        let mut sorted: Vec<_> = tokens.iter().map(|(t, ids)| (t.as_str(), ids.len())).collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));

        for (token, count) in sorted.iter().take(15) {
            println!("  {:15} {}", token, count);
        }

        if sorted.len() > 15 {
            println!("  ... and {} more", sorted.len() - 15);
        }
    }

    Ok(())
}

/// Format byte size to human readable
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
