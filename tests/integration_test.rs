use anyhow::Result;
use git2::{IndexAddOption, Oid, Repository, Signature};
use histview::diff::{build_tree, FileStatus, LineKind};
use histview::git::GitRepository;
use histview::graph::{assign_lanes, build_rows};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary git repository driven through libgit2.
struct TestRepo {
    _temp_dir: TempDir,
    repo_path: PathBuf,
    repo: Repository,
}

impl TestRepo {
    fn new() -> Result<Self> {
        let temp_dir = tempfile::tempdir()?;
        let repo_path = temp_dir.path().to_path_buf();
        let repo = Repository::init(&repo_path)?;

        let mut config = repo.config()?;
        config.set_str("user.name", "Test User")?;
        config.set_str("user.email", "test@example.com")?;

        Ok(TestRepo {
            _temp_dir: temp_dir,
            repo_path,
            repo,
        })
    }

    fn write(&self, path: &str, content: &str) -> Result<()> {
        let full = self.repo_path.join(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(full, content)?;
        Ok(())
    }

    fn remove(&self, path: &str) -> Result<()> {
        fs::remove_file(self.repo_path.join(path))?;
        Ok(())
    }

    fn stage(&self, path: &str) -> Result<()> {
        let mut index = self.repo.index()?;
        index.add_path(Path::new(path))?;
        index.write()?;
        Ok(())
    }

    /// Stages the whole working tree and commits it with explicit parents.
    fn commit_to(&self, update_ref: &str, message: &str, parents: &[Oid]) -> Result<Oid> {
        let mut index = self.repo.index()?;
        index.add_all(["*"], IndexAddOption::DEFAULT, None)?;
        index.update_all(["*"], None)?;
        index.write()?;

        let signature = Signature::now("Test User", "test@example.com")?;
        let tree = self.repo.find_tree(index.write_tree()?)?;
        let parents = parents
            .iter()
            .map(|oid| self.repo.find_commit(*oid))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let parent_refs: Vec<&git2::Commit> = parents.iter().collect();

        Ok(self.repo.commit(
            Some(update_ref),
            &signature,
            &signature,
            message,
            &tree,
            &parent_refs,
        )?)
    }

    /// Commits on HEAD, parented on the current HEAD commit if any.
    fn commit(&self, message: &str) -> Result<Oid> {
        let parents: Vec<Oid> = match self.repo.head() {
            Ok(head) => vec![head.peel_to_commit()?.id()],
            Err(_) => Vec::new(),
        };
        self.commit_to("HEAD", message, &parents)
    }

    fn open(&self) -> Result<GitRepository> {
        GitRepository::open_at(&self.repo_path)
    }
}

#[test]
fn log_lists_children_before_parents_with_labels() -> Result<()> {
    let test_repo = TestRepo::new()?;
    test_repo.write("README.md", "hello\n")?;
    let base = test_repo.commit("Initial commit")?;
    test_repo.write("main.txt", "main\n")?;
    let main_work = test_repo.commit("Main work")?;

    test_repo.write("feature.txt", "feature\n")?;
    let feature = test_repo.commit_to("refs/heads/feature", "Feature work", &[base])?;
    let merge = test_repo.commit_to("HEAD", "Merge feature", &[main_work, feature])?;

    let base_commit = test_repo.repo.find_commit(base)?;
    test_repo
        .repo
        .tag_lightweight("v1", base_commit.as_object(), false)?;

    let repo = test_repo.open()?;
    let branch = repo.current_branch()?;
    let commits = repo.log(100)?;
    assert_eq!(commits.len(), 4);

    let position = |oid: Oid| {
        commits
            .iter()
            .position(|c| c.hash == oid.to_string())
            .unwrap()
    };
    assert_eq!(position(merge), 0);
    assert!(position(main_work) < position(base));
    assert!(position(feature) < position(base));

    let merge_commit = &commits[0];
    assert!(merge_commit.is_merge());
    assert_eq!(merge_commit.message, "Merge feature");
    assert_eq!(merge_commit.author, "Test User");
    assert_eq!(merge_commit.refs, vec![format!("HEAD -> {branch}")]);

    assert_eq!(commits[position(feature)].refs, vec!["feature".to_string()]);
    assert_eq!(commits[position(base)].refs, vec!["tag: v1".to_string()]);

    let layout = assign_lanes(&commits);
    assert_eq!(layout.lane_of(&merge.to_string()), Some(0));
    assert_eq!(layout.lane_of(&main_work.to_string()), Some(0));
    assert_eq!(layout.lane_of(&feature.to_string()), Some(1));
    // base waits on both lanes; the one reopened first wins.
    let first_side = if position(main_work) < position(feature) {
        main_work
    } else {
        feature
    };
    assert_eq!(
        layout.lane_of(&base.to_string()),
        layout.lane_of(&first_side.to_string())
    );

    Ok(())
}

#[test]
fn limited_log_reports_dangling_parents() -> Result<()> {
    let test_repo = TestRepo::new()?;
    for i in 0..5 {
        test_repo.write("counter.txt", &format!("{i}\n"))?;
        test_repo.commit(&format!("Commit {i}"))?;
    }

    let repo = test_repo.open()?;
    let commits = repo.log(3)?;
    assert_eq!(commits.len(), 3);
    assert_eq!(commits[0].message, "Commit 4");

    let rows = build_rows(&commits, &assign_lanes(&commits));
    assert!(rows[0].dangling_parents.is_empty());
    assert_eq!(rows[2].dangling_parents, commits[2].parents);

    Ok(())
}

#[test]
fn empty_repository_has_no_history() -> Result<()> {
    let test_repo = TestRepo::new()?;
    let repo = test_repo.open()?;
    assert!(repo.log(10)?.is_empty());
    assert!(!repo.working_changes()?.has_changes());
    Ok(())
}

#[test]
fn commit_files_parses_each_status() -> Result<()> {
    let test_repo = TestRepo::new()?;
    test_repo.write("src/lib.rs", "one\ntwo\nthree\n")?;
    test_repo.write("old.txt", "obsolete\n")?;
    let root = test_repo.commit("Initial commit")?;

    test_repo.write("src/lib.rs", "one\n2\nthree\nfour\n")?;
    test_repo.remove("old.txt")?;
    test_repo.write("docs/guide.md", "# Guide\n")?;
    let change = test_repo.commit("Rework")?;

    let repo = test_repo.open()?;

    let root_files = repo.commit_files(&root.to_string())?;
    assert_eq!(root_files.len(), 2);
    assert!(root_files.iter().all(|f| f.status == FileStatus::Added));

    let files = repo.commit_files(&change.to_string())?;
    let find = |path: &str| files.iter().find(|f| f.display_path() == path).unwrap();

    let lib = find("src/lib.rs");
    assert_eq!(lib.status, FileStatus::Modified);
    assert_eq!((lib.additions, lib.deletions), (2, 1));
    let removed = lib.lines().find(|l| l.kind == LineKind::Delete).unwrap();
    assert_eq!((removed.content.as_str(), removed.old_num), ("two", Some(2)));
    let appended = lib.lines().filter(|l| l.kind == LineKind::Add).last().unwrap();
    assert_eq!((appended.content.as_str(), appended.new_num), ("four", Some(4)));

    let old = find("old.txt");
    assert_eq!(old.status, FileStatus::Deleted);
    assert_eq!(old.deletions, 1);

    let guide = find("docs/guide.md");
    assert_eq!(guide.status, FileStatus::Added);

    let tree = build_tree(&files);
    let names: Vec<&str> = tree.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(names, vec!["docs", "src", "old.txt"]);

    Ok(())
}

#[test]
fn renames_are_detected() -> Result<()> {
    let test_repo = TestRepo::new()?;
    let body = "line one\nline two\nline three\nline four\n";
    test_repo.write("before.txt", body)?;
    test_repo.commit("Add file")?;

    test_repo.remove("before.txt")?;
    test_repo.write("after.txt", body)?;
    test_repo.commit("Rename file")?;

    let repo = test_repo.open()?;
    let files = repo.commit_files("HEAD")?;
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].status, FileStatus::Renamed);
    assert_eq!(files[0].old_path, "before.txt");
    assert_eq!(files[0].new_path, "after.txt");
    assert!(files[0].hunks.is_empty());

    Ok(())
}

#[test]
fn unknown_revision_is_an_error() -> Result<()> {
    let test_repo = TestRepo::new()?;
    test_repo.write("a.txt", "a\n")?;
    test_repo.commit("Initial commit")?;

    let repo = test_repo.open()?;
    let err = repo.commit_files("does-not-exist").unwrap_err();
    assert!(format!("{err:#}").contains("does-not-exist"));

    Ok(())
}

#[test]
fn working_changes_split_by_stage() -> Result<()> {
    let test_repo = TestRepo::new()?;
    test_repo.write("staged.txt", "a\n")?;
    test_repo.write("unstaged.txt", "b\n")?;
    test_repo.commit("Initial commit")?;

    test_repo.write("staged.txt", "a\nmore\n")?;
    test_repo.stage("staged.txt")?;
    test_repo.write("unstaged.txt", "changed\n")?;
    test_repo.write("notes/new.txt", "untracked\n")?;

    let repo = test_repo.open()?;
    let changes = repo.working_changes()?;

    assert!(changes.has_changes());
    assert_eq!(changes.total(), 3);

    assert_eq!(changes.staged.len(), 1);
    assert_eq!(changes.staged[0].new_path, "staged.txt");
    assert_eq!(changes.staged[0].additions, 1);

    assert_eq!(changes.unstaged.len(), 1);
    assert_eq!(changes.unstaged[0].new_path, "unstaged.txt");
    assert_eq!(
        (changes.unstaged[0].additions, changes.unstaged[0].deletions),
        (1, 1)
    );

    assert_eq!(changes.untracked, vec!["notes/new.txt".to_string()]);
    assert_eq!(changes.combined().len(), 2);

    Ok(())
}

#[test]
fn open_outside_repository_fails() {
    let temp_dir = tempfile::tempdir().unwrap();
    let err = GitRepository::open_at(temp_dir.path()).err().unwrap();
    assert!(err.to_string().contains("Not a git repository"));
}
