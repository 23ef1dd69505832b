use std::path::Path;

use packscript::prelude::*;
use serde_json::json;

const SOURCE: &str = "demo.pack";

fn demo_emitter() -> Emitter<MemStore> {
    Emitter::new(CompilerConfig::new(), MemStore::new())
}

#[test]
fn test_full_compilation_pass() {
    let mut emitter = demo_emitter();
    let mut session = emitter.begin(TemplateEnv::new().with("name", "world").with("radius", 3));

    let main = session.create_root(Intent::Tick);
    session.set_namespace(main, "demo");
    session.set_path(main, "main");
    session.add_command(main, "say hello <% name %>").unwrap();

    let branch = session.create_child(main, Intent::None);
    session.set_namespace(branch, "demo");
    session.set_path(branch, "main/branch");
    session
        .add_command(branch, "execute if score @s hits matches <% radius * 2 %>.. run function $parent")
        .unwrap();

    let call = session.invocation_line(branch);
    assert_eq!(call, "function demo/main/branch");
    session.add_command(main, &call).unwrap();

    assert!(emitter.confirm(&mut session, branch, SOURCE).unwrap());
    assert!(emitter.confirm(&mut session, main, SOURCE).unwrap());
    emitter.end(session).unwrap();

    let store = emitter.store();
    assert_eq!(
        store.written(Path::new("addon/functions/demo/main.mcfunction")),
        Some("say hello world\nfunction demo/main/branch")
    );
    assert_eq!(
        store.written(Path::new("addon/functions/demo/main/branch.mcfunction")),
        Some("execute if score @s hits matches 6.. run function demo/main")
    );
    assert_eq!(
        store.written(Path::new("addon/functions/generated/events/tick.mcfunction")),
        Some("function demo/main")
    );
    assert_eq!(
        store.written(Path::new("addon/functions/generated/events/load.mcfunction")),
        Some("")
    );
}

#[test]
fn test_duplicate_address_confirms_once() {
    let mut emitter = demo_emitter();
    let mut session = emitter.begin(TemplateEnv::new());

    let first = session.create_root(Intent::Load);
    session.set_namespace(first, "demo");
    session.set_path(first, "setup");
    session.add_command(first, "scoreboard objectives add hits dummy").unwrap();

    let second = session.create_root(Intent::Load);
    session.set_namespace(second, "demo");
    session.set_path(second, "setup");
    session.add_command(second, "say this one loses").unwrap();

    assert!(emitter.confirm(&mut session, first, SOURCE).unwrap());
    assert!(!emitter.confirm(&mut session, second, SOURCE).unwrap());
    emitter.end(session).unwrap();

    assert_eq!(
        emitter
            .store()
            .written(Path::new("addon/functions/demo/setup.mcfunction")),
        Some("scoreboard objectives add hits dummy")
    );
    assert_eq!(
        emitter
            .store()
            .written(Path::new("addon/functions/generated/events/load.mcfunction")),
        Some("function demo/setup")
    );
}

#[test]
fn test_recompilation_replaces_hook_entries() {
    let mut emitter = demo_emitter();

    let mut session = emitter.begin(TemplateEnv::new());
    let old = session.create_root(Intent::Tick);
    session.set_namespace(old, "demo");
    session.set_path(old, "old_loop");
    emitter.confirm(&mut session, old, SOURCE).unwrap();
    emitter.end(session).unwrap();

    emitter.reset_source(SOURCE);
    let mut session = emitter.begin(TemplateEnv::new());
    let new = session.create_root(Intent::Tick);
    session.set_namespace(new, "demo");
    session.set_path(new, "new_loop");
    emitter.confirm(&mut session, new, SOURCE).unwrap();
    emitter.end(session).unwrap();

    assert_eq!(
        emitter
            .store()
            .written(Path::new("addon/functions/generated/events/tick.mcfunction")),
        Some("function demo/new_loop")
    );
}

#[test]
fn test_template_failure_names_the_literal() {
    let mut emitter = demo_emitter();
    let mut session = emitter.begin(TemplateEnv::new());

    let main = session.create_root(Intent::None);
    let err = session.add_command(main, "say <% 1 + %>").unwrap_err();

    assert_eq!(err.template(), "say ${ 1 + }");
    assert!(err.to_string().starts_with("invalid template literal"));
    assert!(session.functions()[main].commands().is_empty());
}

#[test]
fn test_manifest_translation_shares_the_store() {
    let mut emitter = demo_emitter();
    emitter.store_mut().preload(
        "demo_pack/pack.mcmeta",
        r#"{"pack": {"pack_format": 9, "description": "combat arena"}}"#,
    );

    let manifest = translate_manifest(
        emitter.store_mut(),
        Path::new("demo_pack/pack.mcmeta"),
        Path::new("demo_pack/manifest.json"),
    )
    .unwrap();

    assert_eq!(manifest["header"]["description"], json!("combat arena"));
    assert_eq!(manifest["header"]["min_engine_version"], json!([1, 18, 2]));

    let text = emitter
        .store()
        .contents(Path::new("demo_pack/manifest.json"))
        .expect("manifest should be written through the shared store");
    assert!(text.contains("\t\"header\""));
}
