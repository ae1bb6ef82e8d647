//! Repository root discovery
//!
//! The walk is depth first in file name order. A directory whose immediate
//! children include a `.git` directory is a repository root: it is emitted and
//! its subtree is never entered. Nested repositories are therefore only found
//! when they are not inside another repository.

use dashmap::DashSet;
use ignore::WalkBuilder;
use std::fs;
use std::io;
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::config::REPOSITORY_MARKER;
use super::output::OutputSerializer;

/// Checks whether `dir` directly contains a `.git` directory
///
/// A `.git` file (worktrees, submodules) or symlink does not count.
pub fn is_repository_root(dir: &Path) -> io::Result<bool> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_name() == REPOSITORY_MARKER && entry.file_type()?.is_dir() {
            return Ok(true);
        }
    }
    Ok(false)
}

fn describe_walk_error(err: &ignore::Error) -> String {
    match err {
        ignore::Error::WithPath { path, err } => format!("walk {path:?} failed with {err}"),
        ignore::Error::WithDepth { err, .. } => describe_walk_error(err),
        other => format!("walk failed with {other}"),
    }
}

/// Walks `root` and hands every repository root to `on_root`
///
/// Traversal errors are passed to `on_error` as `walk "<path>" failed with
/// <error>` and the affected subtree is skipped. Returning
/// `ControlFlow::Break` from `on_root` stops the walk.
/// Returns the number of roots accepted by `on_root`.
pub fn walk_repository_roots<F, E>(root: &Path, mut on_root: F, mut on_error: E) -> usize
where
    F: FnMut(PathBuf) -> ControlFlow<()>,
    E: FnMut(&str),
{
    // Directories whose children must not be visited
    let pruned: Arc<DashSet<PathBuf>> = Arc::new(DashSet::new());
    let pruned_filter = Arc::clone(&pruned);

    let walker = WalkBuilder::new(root)
        .standard_filters(false) // Visit hidden and ignored directories too
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(move |entry| {
            entry
                .path()
                .parent()
                .map_or(true, |parent| !pruned_filter.contains(parent))
        })
        .build();

    let mut emitted = 0;
    for result in walker {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                on_error(&describe_walk_error(&err));
                continue;
            }
        };

        if !entry.file_type().is_some_and(|ft| ft.is_dir()) {
            continue;
        }

        let dir = entry.path();
        match is_repository_root(dir) {
            Ok(true) => {
                pruned.insert(dir.to_path_buf());
                match on_root(dir.to_path_buf()) {
                    ControlFlow::Continue(()) => emitted += 1,
                    ControlFlow::Break(()) => break,
                }
            }
            Ok(false) => {}
            // The walker fails the same way when it descends, and reports it then
            Err(err) => debug!(dir = %dir.display(), %err, "cannot list directory"),
        }
    }

    emitted
}

/// Feeds discovered repository roots into the handoff channel
///
/// Blocks whenever the channel is full, so discovery keeps pace with the
/// workers. Dropping `sender` on return closes the channel and lets the
/// workers drain and exit. Must run outside the async runtime.
pub fn produce_repository_roots(
    root: &Path,
    sender: mpsc::Sender<PathBuf>,
    serializer: &OutputSerializer,
) -> usize {
    walk_repository_roots(
        root,
        |dir| {
            debug!(dir = %dir.display(), "discovered repository");
            match sender.blocking_send(dir) {
                Ok(()) => ControlFlow::Continue(()),
                Err(_) => {
                    debug!("all workers are gone, stopping discovery");
                    ControlFlow::Break(())
                }
            }
        },
        |line| {
            if let Err(err) = serializer.blocking_error_line(line) {
                warn!(%err, "failed to report traversal error");
            }
        },
    )
}

/// Collects every repository root below `root` in traversal order
pub fn find_repository_roots(root: impl AsRef<Path>) -> Vec<PathBuf> {
    let mut roots = Vec::new();
    walk_repository_roots(
        root.as_ref(),
        |dir| {
            roots.push(dir);
            ControlFlow::Continue(())
        },
        |line| warn!("{line}"),
    );
    roots
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn repo(root: &Path, rel: &str) -> PathBuf {
        let path = root.join(rel);
        fs::create_dir_all(path.join(REPOSITORY_MARKER)).unwrap();
        path
    }

    #[test]
    fn test_marker_directory_identifies_root() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        assert!(!is_repository_root(root).unwrap());
        repo(root, "");
        assert!(is_repository_root(root).unwrap());
    }

    #[test]
    fn test_marker_file_is_not_a_repository() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join(REPOSITORY_MARKER), "gitdir: ../elsewhere").unwrap();

        assert!(!is_repository_root(root).unwrap());
        assert!(find_repository_roots(root).is_empty());
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        assert!(is_repository_root(&temp_dir.path().join("missing")).is_err());
    }

    #[test]
    fn test_roots_come_out_in_name_order() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let c = repo(root, "c");
        let a = repo(root, "a");
        let b = repo(root, "nested/b");

        assert_eq!(find_repository_roots(root), vec![a, c, b]);
    }

    #[test]
    fn test_no_descent_below_a_root() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let outer = repo(root, "outer");
        repo(root, "outer/inner");
        repo(root, "outer/deep/er/inner");

        assert_eq!(find_repository_roots(root), vec![outer]);
    }

    #[test]
    fn test_break_stops_the_walk() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        for name in ["a", "b", "c"] {
            repo(root, name);
        }

        let mut seen = Vec::new();
        let emitted = walk_repository_roots(
            root,
            |dir| {
                seen.push(dir);
                if seen.len() == 2 {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            },
            |_| {},
        );

        assert_eq!(seen.len(), 2);
        assert_eq!(emitted, 1);
    }

    #[test]
    fn test_walk_error_for_missing_root() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing");

        let mut errors = Vec::new();
        let emitted = walk_repository_roots(
            &missing,
            |_| ControlFlow::Continue(()),
            |line| errors.push(line.to_string()),
        );

        assert_eq!(emitted, 0);
        assert!(!errors.is_empty());
        assert!(errors.iter().all(|line| line.starts_with("walk ")), "got {errors:?}");
    }

    #[test]
    fn test_producer_closes_channel_when_done() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        repo(root, "a");
        repo(root, "b");

        let (sender, mut receiver) = mpsc::channel(8);
        let serializer = OutputSerializer::new(Box::new(io::sink()), Box::new(io::sink()), false);

        let emitted = produce_repository_roots(root, sender, &serializer);

        assert_eq!(emitted, 2);
        assert_eq!(receiver.blocking_recv(), Some(root.join("a")));
        assert_eq!(receiver.blocking_recv(), Some(root.join("b")));
        assert_eq!(receiver.blocking_recv(), None);
    }

    #[test]
    fn test_producer_stops_when_receivers_are_gone() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        repo(root, "a");
        repo(root, "b");

        let (sender, receiver) = mpsc::channel(8);
        drop(receiver);
        let serializer = OutputSerializer::new(Box::new(io::sink()), Box::new(io::sink()), false);

        assert_eq!(produce_repository_roots(root, sender, &serializer), 0);
    }
}
