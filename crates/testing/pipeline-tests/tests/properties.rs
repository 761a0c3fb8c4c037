//! Naming guarantees that must hold for any graph

use indexmap::IndexMap;
use pipeline_tests::samples;
use pipeline_tests::{GraphFixture, TypeFixture, system};
use tb_driver::{PipelineConfig, PipelineOutput};
use tb_ids::{MemberStableId, StableId, TypeStableId};
use tb_rename::{
    ConflictStrategy, DecisionSource, NameRequest, RenameConfig, RenameEngine, RenameScope, TARGET_RESERVED_WORDS,
};

fn run(fixture: &GraphFixture) -> PipelineOutput {
    fixture.run(&PipelineConfig::default()).unwrap()
}

/// Every `(stable id, final name)` pair stamped on the output graph, sorted
fn stamped_names(output: &PipelineOutput) -> Vec<(String, Option<String>)> {
    let mut names = Vec::new();
    for ty in output.graph.types() {
        names.push((ty.stable_id.to_string(), ty.final_name.clone()));
        for (_, info) in ty.members.infos() {
            names.push((info.stable_id.to_string(), info.final_name.clone()));
        }
        for view in &ty.views {
            names.push((view.accessor_id.to_string(), view.accessor_final_name.clone()));
        }
    }
    names.sort();
    names
}

#[test]
fn test_scope_uniqueness() {
    let output = run(&samples::everything());

    let mut holders: IndexMap<(&str, &str), Vec<(&StableId, Option<&str>)>> = IndexMap::new();
    for decision in &output.decisions {
        holders
            .entry((decision.scope.as_str(), decision.final_name.as_str()))
            .or_default()
            .push((&decision.id, decision.overload_group.as_deref()));
    }

    for ((scope, name), holders) in holders {
        if holders.len() < 2 {
            continue;
        }
        let group = holders[0].1;
        assert!(
            group.is_some() && holders.iter().all(|(_, other)| *other == group),
            "`{name}` held by {} symbols outside one overload group in {scope}",
            holders.len()
        );
    }
}

#[test]
fn test_no_reserved_word_survives() {
    let output = run(&samples::everything());
    for decision in &output.decisions {
        if decision.source == DecisionSource::Verbatim {
            continue;
        }
        assert!(
            !TARGET_RESERVED_WORDS.contains(&decision.final_name.as_str()),
            "{} named `{}` in {}",
            decision.id,
            decision.final_name,
            decision.scope
        );
    }
}

#[test]
fn test_reservation_idempotent() {
    let mut engine = RenameEngine::new(RenameConfig::default());
    let owner = TypeStableId::new("app", "App.Widget");
    let scope = RenameScope::type_surface(&owner, false);
    let member = MemberStableId::new("app", "App.Widget", "Start", "()");

    let first = engine
        .reserve(NameRequest::new(member.clone(), "Start", scope.clone()))
        .unwrap();
    let second = engine.reserve(NameRequest::new(member, "Start", scope.clone())).unwrap();

    assert_eq!(first, second);
    assert_eq!(engine.decisions_in(&scope).count(), 1);
}

#[test]
fn test_pipeline_idempotent() {
    let fixture = samples::everything();
    let first = run(&fixture);
    let second = run(&fixture);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_suffixes_monotonic_per_base() {
    let fixture = GraphFixture::new().with(
        TypeFixture::class("App.Bag")
            .field("Value", system("Int32"))
            .method("Value", system("Void"))
            .property("Value", system("String")),
    );
    let output = run(&fixture);
    let bag = output.graph.get(&TypeStableId::new("app", "App.Bag")).unwrap();

    let mut names: Vec<_> = bag
        .members
        .infos()
        .map(|(_, info)| (info.declaration_order, info.final_name.clone().unwrap()))
        .collect();
    names.sort();
    let names: Vec<_> = names.into_iter().map(|(_, name)| name).collect();
    assert_eq!(names, ["Value", "Value2", "Value3"]);
}

#[test]
fn test_suffix_never_reused() {
    let mut engine = RenameEngine::new(RenameConfig::default());
    let owner = TypeStableId::new("app", "App.Widget");
    let scope = RenameScope::type_surface(&owner, false);
    let request = |name: &str, signature: &str| {
        NameRequest::new(MemberStableId::new("app", "App.Widget", name, signature), "Item", scope.clone())
    };

    assert_eq!(engine.reserve(request("Item", "")).unwrap(), "Item");
    assert_eq!(engine.reserve(request("Item", "()")).unwrap(), "Item2");
    // a symbol literally named Item3 takes the next suffix's slot
    engine
        .reserve(NameRequest::new(
            MemberStableId::new("app", "App.Widget", "Item3", ""),
            "Item3",
            scope.clone(),
        ))
        .unwrap();
    assert_eq!(engine.reserve(request("Item", "(System.Int32)")).unwrap(), "Item4");

    let last = engine
        .decision(
            &MemberStableId::new("app", "App.Widget", "Item", "(System.Int32)").into(),
            &scope,
        )
        .unwrap();
    assert_eq!(last.strategy, ConflictStrategy::NumericSuffix(4));
}

#[test]
fn test_deterministic_under_reordering() {
    let fixture = samples::everything();
    let forward = run(&fixture);
    let backward = run(&fixture.reversed());

    assert_eq!(
        serde_json::to_string(&forward.decisions).unwrap(),
        serde_json::to_string(&backward.decisions).unwrap()
    );
    assert_eq!(forward.diagnostics, backward.diagnostics);
    assert_eq!(stamped_names(&forward), stamped_names(&backward));
}
