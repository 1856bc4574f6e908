use std::fs::File;
use std::path::{Path, PathBuf};

use framescope_pipeline::{export_column_names, Pipeline, PipelineConfig};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

const FIXTURE: &str = "\
DATE,TITLE,FULL_TEXT,FROM,SOURCE_TYPE,URL,REACH,INTERACTIONS
2022-05-01,Zavjera,zavjera i fake news u medijima,www.bitno.net/clanak,web,https://bitno.net/1,\"1.234,5\",abc
2022-05-01,Zavjera,zavjera i fake news u medijima,www.bitno.net/clanak,web,https://bitno.net/1,10,1
15.03.2021.,Cijepljenje,vrijeme je lijepo,index.hr,WEB ,https://index.hr/2,20,2
2021-06-01,Objava,zavjera posvuda,facebook.com/page,social,https://facebook.com/3,99,9
2021-07-01,Prazno,   ,hkm.hr,web,https://hkm.hr/4,1,1
not-a-date,Datum,tekst bez datuma,hkm.hr,web,https://hkm.hr/5,1,1
2023-02-01,Euro,korupcija u vladi,dnevno.hr,web,,5,5
";

fn pipeline(dir: &Path) -> Pipeline {
    let input_path = dir.join("media_export.csv");
    std::fs::write(&input_path, FIXTURE).unwrap();
    Pipeline::new(PipelineConfig {
        input_path,
        workspace_root: dir.to_path_buf(),
    })
    .unwrap()
}

fn read_csv(path: PathBuf) -> Vec<csv::StringRecord> {
    csv::Reader::from_path(path)
        .unwrap()
        .records()
        .map(Result::unwrap)
        .collect()
}

#[tokio::test]
async fn full_run_filters_classifies_and_exports() {
    let dir = tempfile::tempdir().unwrap();
    let summary = pipeline(dir.path()).run_once().await.unwrap();

    assert_eq!(summary.clean.raw_rows, 7);
    assert_eq!(summary.clean.dropped_non_web, 1);
    assert_eq!(summary.clean.dropped_empty_text, 1);
    assert_eq!(summary.clean.dropped_invalid_date, 1);
    assert_eq!(summary.clean.dropped_duplicates, 1);
    assert_eq!(summary.clean.coerced_numeric_cells, 1);
    assert_eq!(summary.clean.kept_rows, 3);

    let run_dir = PathBuf::from(&summary.run_dir);
    let columns = export_column_names();
    let col = |name: &str| columns.iter().position(|c| c == name).unwrap();

    let full = read_csv(run_dir.join("corpora/full.csv"));
    assert_eq!(full.len(), 3);
    assert!(full.iter().all(|r| &r[col("source_type")] == "web"));
    assert!(!full.iter().any(|r| r[col("publisher_id")].contains("facebook")));

    let first = &full[0];
    assert_eq!(&first[col("media_type")], "Catholic");
    assert_eq!(&first[col("catholic_subcategory")], "Catholic Portals");
    assert_eq!(&first[col("frame_conspiracy")], "true");
    assert_eq!(&first[col("frame_media_critique")], "true");
    assert_eq!(&first[col("frame_total")], "2");
    assert_eq!(&first[col("dominant_frame")], "CONSPIRACY");
    assert_eq!(&first[col("npi_raw")], "3");
    assert_eq!(&first[col("npi_normalized")], "100");
    assert_eq!(&first[col("narrative_phase")], "Ukraine and Energy Crisis");
    assert_eq!(&first[col("reach")], "1234.5");
    assert_eq!(&first[col("interactions")], "0");

    let second = &full[1];
    assert_eq!(&second[col("publish_date")], "2021-03-15");
    assert_eq!(&second[col("media_type")], "Liberal");
    assert_eq!(&second[col("catholic_subcategory")], "");
    assert_eq!(&second[col("dominant_frame")], "NONE");
    assert_eq!(&second[col("has_any_frame")], "false");
    assert_eq!(&second[col("npi_normalized")], "0");
    assert_eq!(&second[col("narrative_phase")], "Vaccination Campaign");

    let third = &full[2];
    assert_eq!(&third[col("media_type")], "Conservative");
    assert_eq!(&third[col("narrative_phase")], "Eurozone Entry");

    assert_eq!(read_csv(run_dir.join("corpora/framed.csv")).len(), 2);
    assert_eq!(read_csv(run_dir.join("corpora/catholic.csv")).len(), 1);
    assert_eq!(read_csv(run_dir.join("corpora/catholic_framed.csv")).len(), 1);

    let reader = ParquetRecordBatchReaderBuilder::try_new(
        File::open(run_dir.join("corpora/framed.parquet")).unwrap(),
    )
    .unwrap()
    .build()
    .unwrap();
    let rows: usize = reader.map(|batch| batch.unwrap().num_rows()).sum();
    assert_eq!(rows, 2);
}

#[tokio::test]
async fn manifest_hashes_match_written_files() {
    let dir = tempfile::tempdir().unwrap();
    let summary = pipeline(dir.path()).run_once().await.unwrap();
    let run_dir = PathBuf::from(&summary.run_dir);

    let manifest: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&summary.manifest).unwrap()).unwrap();
    let files = manifest["files"].as_array().unwrap();
    assert_eq!(files.len(), 10);
    for file in files {
        let path = run_dir.join(file["relative_path"].as_str().unwrap());
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(file["bytes"].as_u64().unwrap(), bytes.len() as u64);
        assert_eq!(
            file["sha256"].as_str().unwrap(),
            framescope_storage::RunStore::sha256_hex(&bytes)
        );
    }

    let summary_json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(run_dir.join("summary.json")).unwrap())
            .unwrap();
    assert_eq!(summary_json["overview"]["after_source_filter"], 6);
    assert_eq!(summary_json["media_types"].as_array().unwrap().len(), 7);
}

#[tokio::test]
async fn repeated_runs_produce_identical_corpora() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = pipeline(dir.path());
    let a = pipeline.run_once().await.unwrap();
    let b = pipeline.run_once().await.unwrap();

    assert_ne!(a.run_id, b.run_id);
    let read = |run_dir: &str| std::fs::read(Path::new(run_dir).join("corpora/full.csv")).unwrap();
    assert_eq!(read(&a.run_dir), read(&b.run_dir));
}
