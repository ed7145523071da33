//! Runs the bundled `generic` provider through every stage against real files.

mod common;

use common::{TestHost, archive_files, args, config};
use datacollector_lib::generic::GenericProvider;
use datacollector_lib::model::{RecommendationDoc, document};
use datacollector_lib::plugin::StaticRegistry;
use datacollector_lib::run;
use std::fs;

#[test]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
fn test_generic_run_end_to_end() {
    let tmp = tempfile::tempdir().unwrap();
    let conf = tmp.path().join("conf");
    fs::create_dir_all(&conf).unwrap();
    fs::write(conf.join("app.properties"), "db.user=app\ndb.password=hunter2\n").unwrap();
    fs::write(conf.join("README"), "password=left alone\n").unwrap();

    let out = tmp.path().join("out");
    let registry = StaticRegistry::new().with_provider(GenericProvider::new().with_host_name("box1"));
    let mut host = TestHost::default();

    run(
        &mut host,
        &registry,
        &config(&out),
        args(&["generic", "run", "--name", "demo", "--target", "KUBERNETES", conf.to_str().unwrap()]),
    )
    .unwrap();
    assert!(host.output_str().contains("Command 'run' completed successfully."));

    let doc: RecommendationDoc = document::load(out.join("demo").join("recommendations.json")).unwrap();
    assert_eq!(doc.host_name, "box1");
    assert_eq!(doc.assessment_units.len(), 1);
    let unit = &doc.assessment_units[0];
    assert_eq!(unit.name, "conf");
    let targets = unit.targets.as_ref().unwrap();
    assert_eq!(targets.len(), 1);
    assert_eq!(targets[0].target.id, "KUBERNETES");

    let report = out.join("demo").join("conf").join("recommendations_Cloud_Kubernetes.json");
    let report: serde_json::Value = serde_json::from_slice(&fs::read(report).unwrap()).unwrap();
    assert_eq!(report["complexity"], "simple");

    let members = archive_files(&out.join("demo.tar.gz"));
    assert!(members.contains("demo/conf/recommendations_Cloud_Kubernetes.json"));
    assert!(members.iter().any(|m| m.ends_with("conf/app.properties")));

    let masked = members.iter().find(|m| m.ends_with("conf/app.properties")).unwrap();
    let masked = fs::read_to_string(out.join(masked)).unwrap();
    assert_eq!(masked, "db.user=app\ndb.password=****\n");

    let readme = members.iter().find(|m| m.ends_with("conf/README")).unwrap();
    assert_eq!(fs::read_to_string(out.join(readme)).unwrap(), "password=left alone\n");
}
