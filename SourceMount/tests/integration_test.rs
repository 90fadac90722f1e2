use pretty_assertions::assert_eq;
use sourcemount::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::{TempDir, tempdir};

/// Write a `gameinfo.txt` whose `SearchPaths` block lists `paths` as `game` entries
fn write_manifest(game_dir: &Path, paths: &[&str]) {
    std::fs::create_dir_all(game_dir).unwrap();
    let mut text = String::from("\"GameInfo\"\n{\n    game \"Test\"\n    FileSystem\n    {\n        SearchPaths\n        {\n");
    for path in paths {
        text.push_str(&format!("            game \"{path}\"\n"));
    }
    text.push_str("        }\n    }\n}\n");
    std::fs::write(game_dir.join("gameinfo.txt"), text).unwrap();
}

fn write_vpk(path: &Path, files: &[(&str, &str)]) {
    let mut writer = VpkWriter::new();
    for (name, data) in files {
        writer = writer.add_file(name, data.as_bytes().to_vec());
    }
    writer.write(path).unwrap();
}

fn keys(registry: &ProviderRegistry) -> Vec<&str> {
    registry.ids().collect()
}

fn root() -> (TempDir, PathBuf) {
    let temp = tempdir().unwrap();
    let root = temp.path().to_path_buf();
    (temp, root)
}

#[test]
fn test_base_addon_scenario() {
    let (_temp, g) = root();
    write_manifest(&g.join("base"), &["addon"]);
    write_vpk(&g.join("base/base_dir.vpk"), &[("scripts/a.txt", "a")]);
    write_manifest(&g.join("addon"), &[]);

    let resolution = ContentResolver::new().resolve_with_diagnostics(&g, "base").unwrap();

    assert_eq!(keys(&resolution.registry), vec!["base", "base_base", "addon"]);
    assert!(resolution.diagnostics.is_empty());
    assert_eq!(
        resolution.registry.get("base").unwrap().kind(),
        ProviderKind::Manifest
    );
    assert_eq!(
        resolution.registry.get("base_base").unwrap().kind(),
        ProviderKind::Vpk
    );
}

#[test]
fn test_single_archive_registers_one_provider() {
    let (_temp, g) = root();
    write_manifest(&g.join("hl2"), &[]);
    write_vpk(&g.join("hl2/hl2_misc_dir.vpk"), &[("scripts/game_sounds.txt", "sounds")]);
    // Part files and non-index archives are not scanned
    std::fs::write(g.join("hl2/hl2_misc_000.vpk"), b"").unwrap();

    let registry = resolve(&g, "hl2").unwrap();

    assert_eq!(keys(&registry), vec!["hl2", "hl2_hl2_misc"]);
}

#[test]
fn test_missing_manifest_is_empty() {
    let (_temp, g) = root();
    std::fs::create_dir_all(g.join("nothing")).unwrap();

    let registry = resolve(&g, "nothing").unwrap();
    assert!(registry.is_empty());

    let registry = resolve(&g, "does_not_exist").unwrap();
    assert!(registry.is_empty());
}

#[test]
fn test_cycle_terminates() {
    let (_temp, g) = root();
    write_manifest(&g.join("a"), &["b"]);
    write_manifest(&g.join("b"), &["a"]);

    let registry = resolve(&g, "a").unwrap();

    assert_eq!(keys(&registry), vec!["a", "b"]);
}

#[test]
fn test_self_reference_terminates() {
    let (_temp, g) = root();
    write_manifest(&g.join("mod"), &["|gameinfo_path|.", "mod"]);

    let resolution = ContentResolver::new().resolve_with_diagnostics(&g, "mod").unwrap();

    assert_eq!(keys(&resolution.registry), vec!["mod"]);
    assert_eq!(resolution.diagnostics.len(), 1);
}

#[test]
fn test_existing_provider_identity_preserved() {
    let (_temp, g) = root();
    write_manifest(&g.join("base"), &["addon"]);
    write_manifest(&g.join("addon"), &[]);
    std::fs::create_dir_all(g.join("elsewhere")).unwrap();

    let mut registry = ProviderRegistry::new();
    registry.register("addon", DirectoryProvider::new(g.join("elsewhere")));
    let original = Arc::clone(registry.get("addon").unwrap());

    let mut diagnostics = Vec::new();
    ContentResolver::new()
        .resolve_into(&g, "base", &mut registry, &mut diagnostics)
        .unwrap();

    let kept = registry.get("addon").unwrap();
    assert!(Arc::ptr_eq(kept, &original));
    assert_eq!(kept.kind(), ProviderKind::Directory);
    assert_eq!(keys(&registry), vec!["addon", "base"]);
}

#[test]
fn test_corrupt_archive_skipped() {
    let (_temp, g) = root();
    write_manifest(&g.join("base"), &[]);
    write_vpk(&g.join("base/first_dir.vpk"), &[("a.txt", "a")]);
    std::fs::write(g.join("base/broken_dir.vpk"), b"definitely not a vpk file").unwrap();
    write_vpk(&g.join("base/second_dir.vpk"), &[("b.txt", "b")]);

    let resolution = ContentResolver::new().resolve_with_diagnostics(&g, "base").unwrap();

    assert_eq!(
        keys(&resolution.registry),
        vec!["base", "base_first", "base_second"]
    );
    assert_eq!(resolution.diagnostics.len(), 1);
    match &resolution.diagnostics[0] {
        Diagnostic::ArchiveSkipped { path, .. } => {
            assert_eq!(path, &g.join("base/broken_dir.vpk"));
        }
        other => panic!("unexpected diagnostic: {other:?}"),
    }
}

#[test]
fn test_corrupt_archive_reported_once() {
    let (_temp, g) = root();
    // Reachable by the directory scan, the token and the search path
    write_manifest(&g.join("base"), &["base/broken.vpk"]);
    std::fs::write(g.join("base/broken_dir.vpk"), b"definitely not a vpk file").unwrap();

    let resolution = ContentResolver::new().resolve_with_diagnostics(&g, "base").unwrap();

    assert_eq!(keys(&resolution.registry), vec!["base"]);
    assert!(matches!(
        resolution.diagnostics.as_slice(),
        [Diagnostic::ArchiveSkipped { .. }]
    ));
}

#[test]
fn test_reserved_token_skipped_with_one_warning() {
    let (_temp, g) = root();
    write_manifest(&g.join("base"), &["|gameinfo_path|."]);

    let resolution = ContentResolver::new().resolve_with_diagnostics(&g, "base").unwrap();

    assert_eq!(keys(&resolution.registry), vec!["base"]);
    assert_eq!(
        resolution.diagnostics,
        vec![Diagnostic::ReservedToken {
            token: "|gameinfo_path|.".to_string(),
            manifest: g.join("base/gameinfo.txt"),
        }]
    );
}

#[test]
fn test_archive_reference_normalized() {
    let (_temp, g) = root();
    write_manifest(&g.join("base"), &["custom.vpk", "missing.vpk"]);
    write_vpk(&g.join("custom_dir.vpk"), &[("materials/x.vmt", "x")]);

    let registry = resolve(&g, "base").unwrap();

    assert_eq!(keys(&registry), vec!["base", "custom"]);
    assert_eq!(registry.get("custom").unwrap().location(), g.join("custom_dir.vpk"));
}

#[test]
fn test_absolute_archive_reference() {
    let (_temp, g) = root();
    let packs = g.join("outside").join("packs");
    std::fs::create_dir_all(&packs).unwrap();
    write_vpk(&packs.join("extra_dir.vpk"), &[("sound/a.wav", "a")]);
    let token = packs.join("extra.vpk");
    write_manifest(&g.join("base"), &[token.to_str().unwrap()]);

    let registry = resolve(&g, "base").unwrap();

    assert_eq!(keys(&registry), vec!["base", "extra"]);
    assert_eq!(registry.get("extra").unwrap().location(), packs.join("extra_dir.vpk"));
}

#[test]
fn test_bare_archive_reference() {
    let (_temp, g) = root();
    write_manifest(&g.join("base"), &["custom"]);
    write_vpk(&g.join("custom_dir.vpk"), &[("materials/x.vmt", "x")]);

    let registry = resolve(&g, "base").unwrap();
    assert_eq!(keys(&registry), vec!["base", "custom"]);

    std::fs::remove_file(g.join("custom_dir.vpk")).unwrap();
    let registry = resolve(&g, "base").unwrap();
    assert_eq!(keys(&registry), vec!["base"]);
}

#[test]
fn test_absolute_directory_reference() {
    let (_temp, g) = root();
    let loose = g.join("outside").join("loose");
    std::fs::create_dir_all(&loose).unwrap();
    write_manifest(&g.join("base"), &[loose.to_str().unwrap()]);

    let registry = resolve(&g, "base").unwrap();

    assert_eq!(keys(&registry), vec!["base", "loose"]);
    assert_eq!(registry.get("loose").unwrap().kind(), ProviderKind::Directory);
}

#[test]
fn test_search_paths_followed() {
    let (_temp, g) = root();
    write_manifest(&g.join("base"), &["|all_source_engine_paths|platform", "shared"]);
    write_manifest(&g.join("platform"), &[]);
    write_vpk(&g.join("platform/platform_misc_dir.vpk"), &[("resource/a.res", "a")]);
    std::fs::create_dir_all(g.join("shared/materials")).unwrap();

    let resolution = ContentResolver::new().resolve_with_diagnostics(&g, "base").unwrap();

    assert_eq!(
        keys(&resolution.registry),
        vec!["base", "platform", "platform_platform_misc", "shared"]
    );
    // The pipe token itself is still reported
    assert_eq!(resolution.diagnostics.len(), 1);
}

#[test]
fn test_search_paths_disabled() {
    let (_temp, g) = root();
    write_manifest(&g.join("base"), &["|all_source_engine_paths|platform", "shared"]);
    write_manifest(&g.join("platform"), &[]);
    std::fs::create_dir_all(g.join("shared")).unwrap();

    let config = ResolverConfig {
        follow_search_paths: false,
        ..ResolverConfig::default()
    };
    let registry = ContentResolver::with_config(config).resolve(&g, "base").unwrap();

    assert_eq!(keys(&registry), vec!["base"]);
}

#[test]
fn test_wildcard_search_path() {
    let (_temp, g) = root();
    write_manifest(&g.join("base"), &["base/custom/*"]);
    std::fs::create_dir_all(g.join("base/custom/zeta")).unwrap();
    std::fs::create_dir_all(g.join("base/custom/alpha")).unwrap();
    write_vpk(&g.join("base/custom/extra_dir.vpk"), &[("a.txt", "a")]);

    let registry = resolve(&g, "base").unwrap();
    assert_eq!(keys(&registry), vec!["base", "alpha", "extra", "zeta"]);

    let config = ResolverConfig {
        expand_wildcards: false,
        ..ResolverConfig::default()
    };
    let registry = ContentResolver::with_config(config).resolve(&g, "base").unwrap();
    assert_eq!(keys(&registry), vec!["base"]);
}

#[test]
fn test_unparsable_manifest_skipped() {
    let (_temp, g) = root();
    write_manifest(&g.join("base"), &["broken", "addon"]);
    std::fs::create_dir_all(g.join("broken")).unwrap();
    std::fs::write(g.join("broken/gameinfo.txt"), "\"GameInfo\"\n{\n    game \"oops\"\n").unwrap();
    write_manifest(&g.join("addon"), &[]);

    let resolution = ContentResolver::new().resolve_with_diagnostics(&g, "base").unwrap();

    assert_eq!(keys(&resolution.registry), vec!["base", "addon"]);
    assert!(matches!(
        resolution.diagnostics.as_slice(),
        [Diagnostic::ManifestSkipped { .. }]
    ));
}

#[test]
fn test_manifest_directory_named_like_archive() {
    let (_temp, g) = root();
    write_manifest(&g.join("base"), &["|all_source_engine_paths|extra_dir.vpk"]);
    write_manifest(&g.join("extra_dir.vpk"), &[]);

    let resolution = ContentResolver::new().resolve_with_diagnostics(&g, "base").unwrap();

    assert_eq!(keys(&resolution.registry), vec!["base", "extra_dir.vpk"]);
    assert_eq!(
        resolution.registry.get("extra_dir.vpk").unwrap().kind(),
        ProviderKind::Manifest
    );
}

#[test]
fn test_deeply_nested_manifest_skipped() {
    let (_temp, g) = root();
    write_manifest(&g.join("base"), &["deep", "addon"]);
    std::fs::create_dir_all(g.join("deep")).unwrap();
    let nested = format!("\"GameInfo\" {}", "{ k ".repeat(200_000));
    std::fs::write(g.join("deep/gameinfo.txt"), nested).unwrap();
    write_manifest(&g.join("addon"), &[]);

    let resolution = ContentResolver::new().resolve_with_diagnostics(&g, "base").unwrap();

    assert_eq!(keys(&resolution.registry), vec!["base", "addon"]);
    assert!(matches!(
        resolution.diagnostics.as_slice(),
        [Diagnostic::ManifestSkipped { .. }]
    ));
}

#[test]
fn test_registry_find_and_read_priority() {
    let (_temp, g) = root();
    write_manifest(&g.join("base"), &["addon"]);
    std::fs::create_dir_all(g.join("base/scripts")).unwrap();
    std::fs::write(g.join("base/scripts/loose.txt"), "from base").unwrap();
    write_vpk(
        &g.join("base/base_dir.vpk"),
        &[("scripts/loose.txt", "from vpk"), ("scripts/packed.txt", "packed")],
    );
    write_manifest(&g.join("addon"), &[]);
    std::fs::write(g.join("addon/only_addon.txt"), "addon").unwrap();

    let registry = resolve(&g, "base").unwrap();

    assert_eq!(registry.read("scripts/loose.txt").unwrap().unwrap(), b"from base");
    assert_eq!(registry.read("Scripts\\Packed.txt").unwrap().unwrap(), b"packed");
    assert_eq!(registry.find("only_addon.txt").unwrap().0, "addon");
    assert!(registry.find("nope.txt").is_none());
    assert_eq!(registry.read("nope.txt").unwrap(), None);
}

#[test]
fn test_resolve_all_independent() {
    let (_temp_a, a) = root();
    let (_temp_b, b) = root();
    write_manifest(&a.join("one"), &[]);
    write_manifest(&b.join("two"), &["three"]);
    write_manifest(&b.join("three"), &[]);

    let results = ContentResolver::new().resolve_all(&[
        (a.clone(), "one".to_string()),
        (b.clone(), "two".to_string()),
        (b.clone(), "missing".to_string()),
    ]);

    let key_sets: Vec<Vec<String>> = results
        .into_iter()
        .map(|r| r.unwrap().registry.ids().map(str::to_string).collect())
        .collect();
    assert_eq!(
        key_sets,
        vec![
            vec!["one".to_string()],
            vec!["two".to_string(), "three".to_string()],
            Vec::<String>::new(),
        ]
    );
}

#[test]
fn test_find_game_then_resolve() {
    let (_temp, g) = root();
    write_manifest(&g.join("ep2"), &[]);
    std::fs::create_dir_all(g.join("ep2/maps")).unwrap();
    std::fs::write(g.join("ep2/maps/ep2_outland_01.bsp"), b"VBSP").unwrap();

    let game = find_game(g.join("ep2/maps/ep2_outland_01.bsp")).unwrap();
    assert_eq!(game.name, "ep2");

    let registry = resolve(&game.root, &game.name).unwrap();
    assert_eq!(keys(&registry), vec!["ep2"]);
}

#[test]
fn test_config_file_applied() {
    let (_temp, g) = root();
    let config_path = g.join("sourcemount.toml");
    std::fs::write(&config_path, "follow_search_paths = false\nverify_crc = false\n").unwrap();

    let config = ResolverConfig::load(&config_path).unwrap();
    assert!(!config.follow_search_paths);
    assert!(!config.verify_crc);
    assert!(config.expand_wildcards);
    assert_eq!(config.manifest_name, "gameinfo.txt");
}
