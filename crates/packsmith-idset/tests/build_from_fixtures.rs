//! ID sets built from fixture repositories.

use packsmith_core::FileType;
use packsmith_idset::{Duplicate, IdSet};
use packsmith_testsuite::{CodeUnitSpec, Integration, Repo, Script};
use serde_json::json;

fn populated_repo() -> (tempfile::TempDir, Repo) {
    let dir = tempfile::tempdir().unwrap();
    let mut repo = Repo::new(dir.path()).unwrap();

    let pack = repo.create_pack("Intel").unwrap();
    pack.create_integration(
        CodeUnitSpec::named("VirusTotal").with_yml(Integration::default_yml("VirusTotal")),
    )
    .unwrap();
    let mut script_yml = Script::default_yml("Enrich");
    script_yml["dependson"] = json!({ "must": ["VirusTotal|||file"] });
    pack.create_script(CodeUnitSpec::named("Enrich").with_yml(script_yml))
        .unwrap();
    pack.create_layout(
        Some("intel"),
        Some(json!({ "id": "intel", "name": "Intel", "kind": "details" })),
    )
    .unwrap();
    pack.create_incident_field(
        Some("score"),
        Some(json!({ "id": "incident_score", "name": "Score", "fromVersion": "5.0.0" })),
        true,
    )
    .unwrap();

    let other = repo.create_pack("Triage").unwrap();
    other.create_test_script().unwrap();
    std::fs::write(
        other.path().join("Playbooks/playbook-Triage.yml"),
        "\
id: Triage
name: Triage
tasks:
  '1':
    task:
      scriptName: Enrich
  '2':
    task:
      playbookName: Sub
",
    )
    .unwrap();

    (dir, repo)
}

#[test]
fn build_indexes_every_kind() {
    let (_dir, repo) = populated_repo();
    let set = IdSet::build(repo.path()).unwrap();

    let integration = set.find(FileType::Integration, "VirusTotal").unwrap();
    assert_eq!(integration.pack.as_deref(), Some("Intel"));
    assert_eq!(integration.commands, vec!["test-command"]);
    assert_eq!(
        integration.file_path,
        "Packs/Intel/Integrations/VirusTotal/VirusTotal.yml"
    );

    let script_ids: Vec<&str> = set.entries(FileType::Script).iter().map(|e| e.id.as_str()).collect();
    assert_eq!(script_ids, vec!["Enrich", "sample_script"]);
    assert_eq!(
        set.find(FileType::Script, "Enrich").unwrap().depends_on,
        vec!["VirusTotal|||file"]
    );

    let playbook = set.find(FileType::Playbook, "Triage").unwrap();
    assert_eq!(playbook.implementing_scripts, vec!["Enrich"]);
    assert_eq!(playbook.implementing_playbooks, vec!["Sub"]);
    assert_eq!(playbook.pack.as_deref(), Some("Triage"));

    assert_eq!(
        set.find(FileType::Layout, "intel").unwrap().kind.as_deref(),
        Some("details")
    );
    let field = set.find(FileType::IncidentField, "incident_score").unwrap();
    assert_eq!(field.fromversion.as_deref(), Some("5.0.0"));

    // Empty `{}` pack metadata and the changelog companion are not content.
    assert_eq!(set.len(), 6);
    assert!(set.find_duplicates().is_empty());
}

#[test]
fn duplicates_across_packs_detected() {
    let (_dir, mut repo) = populated_repo();
    let copy = repo.create_pack("IntelCopy").unwrap();
    copy.create_integration(
        CodeUnitSpec::named("VirusTotalV2").with_yml(Integration::default_yml("VirusTotal")),
    )
    .unwrap();
    copy.create_incident_field(
        Some("legacy_score"),
        Some(json!({ "id": "incident_score", "name": "Score", "toVersion": "4.9.9" })),
        false,
    )
    .unwrap();

    let set = IdSet::build(repo.path()).unwrap();
    assert_eq!(
        set.find_duplicates(),
        vec![Duplicate {
            section: "integrations",
            id: "VirusTotal".to_string()
        }]
    );
}

#[test]
fn saved_set_round_trips() {
    let (_dir, repo) = populated_repo();
    let set = IdSet::build(repo.path()).unwrap();
    set.save(&repo.id_set_path()).unwrap();
    assert_eq!(IdSet::load(&repo.id_set_path()).unwrap(), set);
}
