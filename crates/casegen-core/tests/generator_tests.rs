//! End-to-end generator tests over matrix files on disk.
//!
//! Expected identifiers are pinned: existing case corpora are keyed by them,
//! so any change in hashing or column ordering must show up here.

use casegen_core::{Generator, GeneratorConfig};
use casegen_test_utils::MatrixFixture;
use pretty_assertions::assert_eq;

const CASE_1: &str = "#! (0001) EXE: tkg --enable-ceip-participation=true --size small -i azure --plan dev\n\nAZURE_CUSTOM_TAGS: tagKey1=tagValue1, tagKey2=tagValue2\nAZURE_LOCATION: westus2\n";
const CASE_2: &str = "#! (0002) EXE: tkg --enable-ceip-participation=false -i azure --plan prod\n\nAZURE_LOCATION: eastus,2\nCLUSTER_CIDR: 100.96.0.0/11\n";
const CASE_3: &str = "#! (0003) EXE: tanzu --size medium -i vsphere --plan dev\n\nAZURE_CUSTOM_TAGS: env=qa\nAZURE_LOCATION: \"quoted\"\n";

#[test]
fn sample_matrix_produces_pinned_case_files() {
    let fx = MatrixFixture::sample();
    let report = Generator::default().run(fx.matrix(), fx.output()).unwrap();

    assert_eq!(report.rows, 3);
    assert!(report.collisions.is_empty());
    assert_eq!(
        fx.output_files(),
        vec!["02454680.case", "30916404.case", "93171592.case"]
    );
    assert_eq!(fx.read_output("30916404.case"), CASE_1);
    assert_eq!(fx.read_output("93171592.case"), CASE_2);
    assert_eq!(fx.read_output("02454680.case"), CASE_3);
}

#[test]
fn rerun_is_byte_identical() {
    let fx = MatrixFixture::sample();
    let generator = Generator::default();
    generator.run(fx.matrix(), fx.output()).unwrap();
    let first: Vec<String> = fx.output_files().iter().map(|n| fx.read_output(n)).collect();

    generator.run(fx.matrix(), fx.output()).unwrap();
    let second: Vec<String> = fx.output_files().iter().map(|n| fx.read_output(n)).collect();

    assert_eq!(first, second);
}

#[test]
fn column_order_does_not_change_output() {
    let shuffled = "\
AZURE_LOCATION,CLUSTER_CIDR,AZURE_CUSTOM_TAGS,--enable-ceip-participation,--size,_INFRA,_PLAN,_CNAME
westus2,NA,tagKey1=v,true,small,azure,dev,tkg
";
    let fx = MatrixFixture::new(shuffled);
    Generator::default().run(fx.matrix(), fx.output()).unwrap();
    assert_eq!(fx.output_files(), vec!["30916404.case"]);
    assert_eq!(fx.read_output("30916404.case"), CASE_1);
}

#[test]
fn identical_rows_collide_and_last_write_wins() {
    let fx = MatrixFixture::new("_CNAME,_PLAN\ntkg,dev\ntkg,prod\ntkg,dev\n");
    let report = Generator::default().run(fx.matrix(), fx.output()).unwrap();

    assert_eq!(report.rows, 3);
    assert_eq!(report.written.len(), 3);
    assert_eq!(report.distinct_files(), 2);
    assert_eq!(report.collisions.len(), 1);
    assert_eq!(report.collisions[0].replaced, 1);
    assert_eq!(report.collisions[0].by, 3);

    let name = report.collisions[0].id.file_name("case");
    assert_eq!(fx.read_output(&name), "#! (0003) EXE: tkg --plan dev\n\n");
}

#[test]
fn tab_delimited_matrix_with_custom_extension() {
    let fx = MatrixFixture::new("_CNAME\t--size\ntkg\tlarge\n");
    let config = GeneratorConfig::new()
        .with_delimiter('\t')
        .with_extension("tcase");
    let report = Generator::new(config).run(fx.matrix(), fx.output()).unwrap();

    assert_eq!(report.rows, 1);
    let files = fx.output_files();
    assert_eq!(files.len(), 1);
    assert!(files[0].ends_with(".tcase"));
    assert_eq!(fx.read_output(&files[0]), "#! (0001) EXE: tkg --size large\n\n");
}

#[test]
fn header_only_matrix_writes_nothing() {
    let fx = MatrixFixture::new("_CNAME,_PLAN\n");
    let report = Generator::default().run(fx.matrix(), fx.output()).unwrap();
    assert_eq!(report.rows, 0);
    assert!(fx.output_files().is_empty());
}
