use std::fs;
use std::path::Path;

use git2::{ErrorClass, ErrorCode, IndexAddOption, Repository as GitRepository};
use revgraph_core::repository::Repository;
use revgraph_core::surfaces::{default_registry, RenderService};
use revgraph_core::{AnchorTable, Error, RenderConfig, Result, Row};
use tempfile::TempDir;

#[test]
fn merge_history_forks_and_converges() -> Result<()> {
    let temp = TempDir::new().expect("tempdir");
    build_merge_history(temp.path())?;

    let repo = Repository::open(temp.path())?;
    let history = repo.history(None)?;
    assert_eq!(history.len(), 4);

    let merge = &history[0];
    assert_eq!(merge.revision.summary.as_deref(), Some("merge feature"));
    assert_eq!(merge.row.graphnode_glyph, "@");
    assert!(merge.row.edges.is_empty());
    assert_eq!(merge.row.vertex.column, 0);

    let base = &history[3];
    assert_eq!(base.revision.summary.as_deref(), Some("base"));
    assert_eq!(base.row.graphnode_glyph, "o");
    assert_eq!(base.row.vertex.column, 0);
    assert_eq!(base.row.edges.len(), 2);
    assert!(base.row.edges.iter().all(|edge| edge.end_column == 0));

    let middle: Vec<i64> = history[1..3]
        .iter()
        .map(|entry| entry.row.vertex.column)
        .collect();
    assert!(middle.contains(&0));
    assert!(middle.contains(&1));

    let feature = history
        .iter()
        .find(|entry| entry.revision.summary.as_deref() == Some("feature work"))
        .expect("feature commit");
    assert_eq!(feature.revision.reference.as_deref(), Some("feature"));
    assert_eq!(feature.row.vertex.column, 1);

    Ok(())
}

#[test]
fn history_rows_render_to_svg() -> Result<()> {
    let temp = TempDir::new().expect("tempdir");
    build_merge_history(temp.path())?;

    let repo = Repository::open(temp.path())?;
    let rows: Vec<Row> = repo
        .history(None)?
        .into_iter()
        .map(|entry| entry.row)
        .collect();

    let service = RenderService::new(default_registry(), RenderConfig::default())?;
    let mut anchors = AnchorTable::for_rows(&rows, 24.0);
    let rendered = service.render("svg", &rows, &mut anchors)?;

    assert_eq!(rendered.summary.vertices, 4);
    assert_eq!(rendered.summary.curves, 2);
    assert_eq!(rendered.summary.columns, 1);

    let document = String::from_utf8(rendered.output.bytes).expect("utf-8 svg");
    assert!(document.starts_with("<svg "));
    assert_eq!(document.matches("<circle ").count(), 4);
    assert_eq!(document.matches("<path ").count(), 2);
    assert_eq!(anchors.paddings().len(), 4);

    Ok(())
}

#[test]
fn repository_open_discovers_from_nested_path() -> Result<()> {
    let temp = TempDir::new().expect("tempdir");
    GitRepository::init(temp.path()).map_err(Error::from)?;
    let nested = temp.path().join("nested/deeper");
    fs::create_dir_all(&nested).expect("nested dirs");

    let repo = Repository::open(&nested)?;
    let repo_root = repo.root().canonicalize().expect("canonical root");
    let expected_root = temp.path().canonicalize().expect("canonical temp path");
    assert_eq!(repo_root, expected_root);

    Ok(())
}

#[test]
fn repository_open_rejects_bare_repository() {
    let temp = TempDir::new().expect("tempdir");
    let bare_path = temp.path().join("bare.git");
    GitRepository::init_bare(&bare_path).expect("bare repo");

    let err = Repository::open(&bare_path);
    assert!(matches!(err, Err(Error::BareRepository { .. })));
}

/// base <- main work <- merge, with `feature` branching off base and merged in.
fn build_merge_history(root: &Path) -> Result<()> {
    let git_repo = GitRepository::init(root).map_err(Error::from)?;

    write_file(root.join("README.md"), "# graph\n");
    let base_id = commit_all(&git_repo, "base")?;
    let base = git_repo.find_commit(base_id).map_err(Error::from)?;
    git_repo
        .branch("feature", &base, false)
        .map_err(Error::from)?;

    write_file(root.join("feature.txt"), "feature\n");
    let feature_id =
        commit_with_parents(&git_repo, "refs/heads/feature", "feature work", &[&base])?;
    let feature = git_repo.find_commit(feature_id).map_err(Error::from)?;

    write_file(root.join("main.txt"), "main\n");
    let main_id = commit_with_parents(&git_repo, "HEAD", "main work", &[&base])?;
    let main = git_repo.find_commit(main_id).map_err(Error::from)?;

    commit_with_parents(&git_repo, "HEAD", "merge feature", &[&main, &feature])?;
    Ok(())
}

fn commit_all(repo: &GitRepository, message: &str) -> Result<git2::Oid> {
    let parents = match repo.head() {
        Ok(reference) => {
            let commit = reference.peel_to_commit().map_err(Error::from)?;
            vec![commit]
        }
        Err(err)
            if matches!(
                (err.class(), err.code()),
                (
                    ErrorClass::Reference,
                    ErrorCode::NotFound | ErrorCode::UnbornBranch
                )
            ) =>
        {
            Vec::new()
        }
        Err(err) => return Err(Error::from(err)),
    };

    let parent_refs: Vec<&git2::Commit> = parents.iter().collect();
    commit_with_parents(repo, "HEAD", message, parent_refs.as_slice())
}

fn commit_with_parents(
    repo: &GitRepository,
    update_ref: &str,
    message: &str,
    parents: &[&git2::Commit],
) -> Result<git2::Oid> {
    let mut index = repo.index().map_err(Error::from)?;
    index
        .add_all(["*"], IndexAddOption::DEFAULT, None)
        .map_err(Error::from)?;
    index.write().map_err(Error::from)?;
    let tree_id = index.write_tree().map_err(Error::from)?;
    let tree = repo.find_tree(tree_id).map_err(Error::from)?;
    let signature = git2::Signature::now("Test User", "test@example.com").map_err(Error::from)?;

    repo.commit(
        Some(update_ref),
        &signature,
        &signature,
        message,
        &tree,
        parents,
    )
    .map_err(Error::from)
}

fn write_file(path: impl AsRef<Path>, contents: &str) {
    fs::create_dir_all(
        path.as_ref()
            .parent()
            .expect("path should have a parent directory"),
    )
    .expect("create directories");
    fs::write(path, contents).expect("write file");
}
