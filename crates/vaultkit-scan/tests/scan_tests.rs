use std::fs;
use std::path::Path;

use tempfile::TempDir;
use vaultkit_scan::{
    BRANCH, LAST_BRANCH, TreeRenderer, VaultConfig, VaultNode, VaultScanner, WarningKind,
    print_vault_structure,
};

/// A vault mixing documents, attachments, hidden entries and empty folders.
fn create_mixed_vault() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    for dir in [
        "Projects/alpha",
        "Projects/Beta",
        "projects-old",
        "Attachments",
        "Empty/Nested",
        ".obsidian/plugins",
        ".trash",
    ] {
        fs::create_dir_all(root.join(dir)).unwrap();
    }
    for file in [
        "README.md",
        "index.md",
        "Zettel.md",
        "Projects/alpha/plan.md",
        "Projects/alpha/Notes.md",
        "Projects/Beta/spec.md",
        "Projects/overview.md",
        "projects-old/legacy.md",
        ".obsidian/plugins/data.md",
        ".trash/deleted.md",
        ".draft.md",
    ] {
        fs::write(root.join(file), "# note").unwrap();
    }
    for file in ["Attachments/photo.png", "Projects/alpha/data.csv", "todo.txt"] {
        fs::write(root.join(file), [1u8, 2, 3]).unwrap();
    }

    temp
}

fn render_tree(config: &VaultConfig) -> String {
    let tree = VaultScanner::new().scan(config).unwrap();
    let mut out = Vec::new();
    TreeRenderer::new(&tree).write_tree(&mut out).unwrap();
    String::from_utf8(out).unwrap()
}

/// Split a rendered line into (depth, name, is_dir, count).
fn parse_line(line: &str) -> Option<(usize, String, bool, Option<u64>)> {
    let start = line.find(BRANCH).or_else(|| line.find(LAST_BRANCH))?;
    let depth = line[..start].chars().count() / 4;
    let rest = &line[start..];
    let rest = rest
        .strip_prefix(BRANCH)
        .or_else(|| rest.strip_prefix(LAST_BRANCH))?;

    if let Some(dir) = rest.strip_prefix("📁 ") {
        let (name, label) = dir.rsplit_once(" (")?;
        let count = label
            .trim_end_matches(')')
            .trim_end_matches(" files")
            .parse()
            .ok();
        Some((depth, name.to_string(), true, count.or(Some(0))))
    } else {
        let name = rest.strip_prefix("📄 ")?;
        Some((depth, name.to_string(), false, None))
    }
}

#[test]
fn test_rendered_files_match_extension_and_are_visible() {
    let temp = create_mixed_vault();
    for show_empty in [false, true] {
        let text = render_tree(&VaultConfig::new(temp.path()).with_show_empty_folders(show_empty));

        for (depth, name, is_dir, _) in text.lines().filter_map(parse_line) {
            if depth > 0 {
                assert!(!name.starts_with('.'), "hidden entry rendered: {name}");
            }
            if !is_dir {
                assert!(name.ends_with(".md"), "non-document rendered: {name}");
            }
        }
        assert!(!text.contains("photo.png"));
        assert!(!text.contains("todo.txt"));
        assert!(!text.contains(".obsidian"));
    }
}

#[test]
fn test_rendered_dirs_have_documents_without_show_empty() {
    let temp = create_mixed_vault();
    let text = render_tree(&VaultConfig::new(temp.path()));

    let dirs: Vec<_> = text
        .lines()
        .filter_map(parse_line)
        .filter(|(_, _, is_dir, _)| *is_dir)
        .collect();
    assert!(!dirs.is_empty());
    for (_, name, _, count) in &dirs {
        assert!(count.unwrap_or(0) >= 1, "{name} rendered with no documents");
    }
    assert!(!text.contains("Attachments"));
    assert!(!text.contains("Empty"));

    let text = render_tree(&VaultConfig::new(temp.path()).with_show_empty_folders(true));
    assert!(text.contains("📁 Attachments (empty)"));
    assert!(text.contains("📁 Empty (empty)"));
    assert!(text.contains("📁 Nested (empty)"));
}

#[test]
fn test_sibling_ordering() {
    let temp = create_mixed_vault();
    let text = render_tree(&VaultConfig::new(temp.path()).with_show_empty_folders(true));
    let entries: Vec<_> = text.lines().filter_map(parse_line).collect();

    // Walk each sibling run: consecutive entries at the same depth with no
    // shallower entry between them.
    for (i, (depth, _, _, _)) in entries.iter().enumerate() {
        let siblings: Vec<_> = entries[i..]
            .iter()
            .take_while(|(d, _, _, _)| d >= depth)
            .filter(|(d, _, _, _)| d == depth)
            .collect();

        let first_file = siblings.iter().position(|(_, _, is_dir, _)| !is_dir);
        if let Some(first_file) = first_file {
            assert!(
                siblings[first_file..].iter().all(|(_, _, is_dir, _)| !is_dir),
                "directory listed after a file"
            );
        }
        for pair in siblings.windows(2) {
            let (a_dir, b_dir) = (pair[0].2, pair[1].2);
            if a_dir == b_dir {
                assert!(pair[0].1.to_lowercase() <= pair[1].1.to_lowercase());
            }
        }
    }

    let order: Vec<String> = entries
        .iter()
        .filter(|(depth, ..)| *depth == 1)
        .map(|(_, name, ..)| name.clone())
        .collect();
    assert_eq!(
        order,
        [
            "Attachments",
            "Empty",
            "Projects",
            "projects-old",
            "index.md",
            "README.md",
            "Zettel.md"
        ]
    );
}

#[test]
fn test_counts_are_recursive() {
    let temp = create_mixed_vault();
    let tree = VaultScanner::new()
        .scan(&VaultConfig::new(temp.path()))
        .unwrap();

    let projects = tree
        .root
        .children
        .iter()
        .find(|c| c.name.as_str() == "Projects")
        .unwrap();
    assert_eq!(projects.document_count(), 4);
    // Eight visible documents plus three under hidden names
    assert_eq!(tree.root.document_count(), 11);
    assert_eq!(tree.total_documents(), 11);
    // Projects, alpha, Beta, projects-old, Attachments, Empty, Nested,
    // .obsidian, plugins, .trash
    assert_eq!(tree.total_dirs(), 10);
    assert_eq!(tree.root.dir_count(), 10);
}

#[test]
fn test_counts_match_naive_rescan() {
    fn naive_count(path: &Path) -> u64 {
        let mut count = 0;
        for entry in fs::read_dir(path).unwrap() {
            let entry = entry.unwrap();
            let name = entry.file_name().to_string_lossy().to_string();
            let ty = entry.file_type().unwrap();
            if ty.is_dir() {
                count += naive_count(&entry.path());
            } else if name.ends_with(".md") {
                count += 1;
            }
        }
        count
    }

    fn check(node: &VaultNode) {
        if node.is_dir() {
            assert_eq!(node.document_count(), naive_count(&node.path), "{}", node.name);
            node.children.iter().for_each(check);
        }
    }

    let temp = create_mixed_vault();
    let tree = VaultScanner::new()
        .scan(&VaultConfig::new(temp.path()))
        .unwrap();
    check(&tree.root);
}

#[test]
fn test_print_vault_structure_full_output() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("Daily")).unwrap();
    fs::write(temp.path().join("Daily/2024-01-05.md"), "").unwrap();

    let mut out = Vec::new();
    let tree = print_vault_structure(&VaultConfig::new(temp.path()), &mut out)
        .unwrap()
        .unwrap();
    let text = String::from_utf8(out).unwrap();

    let mut lines = text.lines();
    assert_eq!(
        lines.next().unwrap(),
        format!("📁 Obsidian Vault Structure: {}", tree.name())
    );
    assert!(lines.next().unwrap().starts_with("📍 Path: "));
    assert_eq!(lines.next().unwrap(), "=".repeat(60));
    assert_eq!(lines.next().unwrap(), "📊 Summary: 1 markdown files in 1 folders");
    assert_eq!(lines.next().unwrap(), "");
    assert_eq!(
        lines.next().unwrap(),
        format!("└── 📁 {} (1 files)", tree.name())
    );
    assert_eq!(lines.next().unwrap(), "    └── 📁 Daily (1 files)");
    assert_eq!(lines.next().unwrap(), "        └── 📄 2024-01-05.md");
    assert!(lines.next().is_none());
}

#[test]
fn test_custom_extension() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("a.txt"), "").unwrap();
    fs::write(temp.path().join("b.md"), "").unwrap();

    let config = VaultConfig::builder()
        .root(temp.path())
        .extension("txt")
        .build()
        .unwrap();
    let text = render_tree(&config);
    assert!(text.contains("📄 a.txt"));
    assert!(!text.contains("b.md"));
}

#[cfg(unix)]
#[test]
fn test_unreadable_directory_is_reported_inline() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::create_dir(root.join("locked")).unwrap();
    fs::write(root.join("locked/secret.md"), "").unwrap();
    fs::write(root.join("open.md"), "").unwrap();
    fs::set_permissions(root.join("locked"), fs::Permissions::from_mode(0o000)).unwrap();

    // Privileged users can read the directory anyway; nothing to check then.
    if fs::read_dir(root.join("locked")).is_ok() {
        fs::set_permissions(root.join("locked"), fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let config = VaultConfig::new(root).with_show_empty_folders(true);
    let tree = VaultScanner::new().scan(&config).unwrap();
    let mut out = Vec::new();
    TreeRenderer::new(&tree).write_tree(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    fs::set_permissions(root.join("locked"), fs::Permissions::from_mode(0o755)).unwrap();

    assert!(tree
        .warnings
        .iter()
        .any(|w| w.kind == WarningKind::PermissionDenied));
    assert!(text.contains("├── 📁 locked (empty)"));
    assert!(text.contains("\n    ❌ Permission denied\n"));
    assert!(text.contains("└── 📄 open.md"));
}
