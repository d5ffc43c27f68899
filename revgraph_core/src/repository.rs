//! Repository access and history walking built on top of libgit2.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use git2::{BranchType, ErrorClass, ErrorCode, Oid, Repository as GitRepository, Sort};

use crate::{
    api::{HistoryEntry, Revision, Signature},
    history::LaneAssigner,
    Error, Result,
};

const HEAD_GLYPH: &str = "@";
const COMMIT_GLYPH: &str = "o";

/// Lightweight handle to a repository whose history is being graphed.
pub struct Repository {
    inner: GitRepository,
    root: PathBuf,
}

impl Repository {
    /// Open a repository from the given filesystem path.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be canonicalized, does not resolve
    /// to a git repository, or if libgit2 reports an unsupported repository
    /// layout (such as a bare repository).
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let original = path.as_ref();
        let canonical = std::fs::canonicalize(original).map_err(|source| Error::Io {
            path: display_path(original),
            source,
        })?;

        let repo = match GitRepository::discover(&canonical) {
            Ok(repo) => repo,
            Err(err)
                if err.class() == ErrorClass::Repository && err.code() == ErrorCode::NotFound =>
            {
                return Err(Error::NotARepository {
                    path: display_path(&canonical),
                })
            }
            Err(err) => return Err(Error::from(err)),
        };

        let root = repo
            .workdir()
            .map(Path::to_path_buf)
            .ok_or_else(|| Error::BareRepository {
                path: display_path(&canonical),
            })?;

        Ok(Self { inner: repo, root })
    }

    /// Returns the absolute path to the repository root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walk HEAD and every local branch, newest first, and lay out lanes.
    ///
    /// Commits are ordered topologically, ties broken by commit time. At most
    /// `limit` commits are returned when a limit is given; lanes cut off by the
    /// limit simply end at the last row.
    ///
    /// # Errors
    ///
    /// Propagates libgit2 failures while enumerating branches or walking
    /// commits.
    pub fn history(&self, limit: Option<usize>) -> Result<Vec<HistoryEntry>> {
        let head = self.head_commit()?;
        let tips = self.branch_tips()?;

        let mut walk = self.inner.revwalk()?;
        walk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        if let Some(commit) = &head {
            walk.push(commit.id())?;
        }
        for oid in tips.keys() {
            walk.push(*oid)?;
        }

        let head_id = head.map(|commit| commit.id());
        let mut lanes = LaneAssigner::new();
        let mut entries = Vec::new();

        for oid in walk.take(limit.unwrap_or(usize::MAX)) {
            let commit = self.inner.find_commit(oid?)?;
            let parents: Vec<String> = commit.parent_ids().map(|id| id.to_string()).collect();
            let glyph = if Some(commit.id()) == head_id {
                HEAD_GLYPH
            } else {
                COMMIT_GLYPH
            };

            let row = lanes.assign(&commit.id().to_string(), &parents, glyph);
            let reference = tips.get(&commit.id()).cloned();
            entries.push(HistoryEntry {
                row,
                revision: commit_to_revision(&commit, reference),
            });
        }

        log::debug!(
            "walked {} commits from {}; {} lanes left open",
            entries.len(),
            display_path(&self.root),
            lanes.open_lanes()
        );
        Ok(entries)
    }

    /// Local branch names keyed by the commit they point at. When several
    /// branches share a tip the alphabetically first name wins.
    fn branch_tips(&self) -> Result<HashMap<Oid, String>> {
        let mut tips: HashMap<Oid, String> = HashMap::new();
        for branch in self.inner.branches(Some(BranchType::Local))? {
            let (branch, _) = branch?;
            let (Some(name), Some(target)) = (branch.name()?, branch.get().target()) else {
                continue;
            };
            tips.entry(target)
                .and_modify(|existing| {
                    if name < existing.as_str() {
                        name.clone_into(existing);
                    }
                })
                .or_insert_with(|| name.to_owned());
        }
        Ok(tips)
    }

    fn head_commit(&self) -> Result<Option<git2::Commit<'_>>> {
        let head = match self.inner.head() {
            Ok(head) => head,
            Err(err)
                if matches!(
                    (err.class(), err.code()),
                    (
                        ErrorClass::Reference,
                        ErrorCode::NotFound | ErrorCode::UnbornBranch
                    )
                ) =>
            {
                return Ok(None)
            }
            Err(err) => return Err(Error::from(err)),
        };

        let resolved = head.resolve()?;
        Ok(Some(resolved.peel_to_commit()?))
    }
}

fn commit_to_revision(commit: &git2::Commit<'_>, reference: Option<String>) -> Revision {
    let author = commit.author();
    let committer = commit.committer();
    Revision {
        oid: commit.id().to_string(),
        reference,
        summary: commit.summary().map(str::to_owned),
        author: convert_signature(&author),
        committer: convert_signature(&committer),
        timestamp: Some(commit.time().seconds()),
    }
}

fn convert_signature(signature: &git2::Signature<'_>) -> Option<Signature> {
    signature.name().map(|name| Signature {
        name: name.to_owned(),
        email: signature.email().map(str::to_owned),
    })
}

fn display_path(path: &Path) -> String {
    path.to_path_buf()
        .into_os_string()
        .to_string_lossy()
        .into_owned()
}

impl fmt::Debug for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Repository")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}
