//! Tests for the scenario file helpers and output handling.

#[cfg(test)]
mod files_tests {
    use std::fs;
    use std::path::Path;

    use rgdt_core::NodeId;

    use crate::files::{load, sibling};

    const XML: &str = r#"<graph>
        <node id="1"><lat>30.00</lat><lon>-88.00</lon></node>
        <node id="2"><lat>30.01</lat><lon>-88.00</lon></node>
        <way id="10"><node>1</node><node>2</node></way>
    </graph>"#;

    const JSON: &str = r#"{
        "bots":     [ { "location": 1, "capacity": 1 } ],
        "packages": [ { "source": 1, "destination": 2 } ],
        "config":   { "bot_speed_kmph": 20.0 }
    }"#;

    #[test]
    fn sibling_keeps_dots() {
        assert_eq!(sibling(Path::new("a/city.v2"), "xml"), Path::new("a/city.v2.xml"));
    }

    #[test]
    fn loads_both_files_with_override() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("city");
        fs::write(sibling(&base, "xml"), XML).unwrap();
        fs::write(sibling(&base, "json"), JSON).unwrap();

        let loaded = load(&base).unwrap();
        assert_eq!(loaded.config.bot_speed_kmph, 20.0);
        assert_eq!(loaded.network.node_count(), 2);
        assert_eq!(loaded.fleet.bots[0].location, NodeId(1));

        // Way cost uses the overridden speed.
        let way = &loaded.network.ways[0];
        let a = loaded.network.node(NodeId(1)).unwrap().pos;
        let b = loaded.network.node(NodeId(2)).unwrap().pos;
        assert_eq!(way.cost, a.distance_km(b) / 20.0);
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("city");
        fs::write(sibling(&base, "json"), JSON).unwrap();

        let err = load(&base).unwrap_err().to_string();
        assert!(err.contains("city.xml"), "{err}");
    }
}

#[cfg(test)]
mod output_tests {
    use std::io;

    use rgdt_core::{BotId, GeoPoint, NodeId, SimConfig};
    use rgdt_fleet::Bot;
    use rgdt_output::{
        BotSummaryRow, OutputError, OutputResult, OutputWriter, SimOutputObserver, StepRow,
        TickSummaryRow,
    };
    use rgdt_sim::Scenario;
    use rgdt_spatial::RoadNetworkBuilder;

    use crate::flush_output;

    /// Accepts every row, then fails to close.
    struct FullDisk;

    impl OutputWriter for FullDisk {
        fn write_steps(&mut self, _rows: &[StepRow]) -> OutputResult<()> {
            Ok(())
        }
        fn write_tick_summary(&mut self, _row: &TickSummaryRow) -> OutputResult<()> {
            Ok(())
        }
        fn write_bot_summaries(&mut self, _rows: &[BotSummaryRow]) -> OutputResult<()> {
            Ok(())
        }
        fn finish(&mut self) -> OutputResult<()> {
            Err(OutputError::Io(io::Error::other("disk full")))
        }
    }

    fn scenario() -> Scenario {
        let mut b = RoadNetworkBuilder::new(40.0);
        b.add_node(NodeId(1), GeoPoint::new(30.0, -88.0));
        let network = b.build().unwrap();
        Scenario::new(network, vec![Bot::new(BotId(0), NodeId(1), 1)], Vec::new()).unwrap()
    }

    #[test]
    fn close_failure_is_returned() {
        let scenario = scenario();
        let mut out = SimOutputObserver::new(FullDisk, &SimConfig::default());

        let errors = flush_output(&mut out, &scenario);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("disk full"), "{}", errors[0]);

        // Already closed: nothing more to report.
        assert!(flush_output(&mut out, &scenario).is_empty());
    }
}
