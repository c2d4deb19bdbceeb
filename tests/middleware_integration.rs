//! End-to-end behavior of the validation middleware
//!
//! Each scenario drives a request through `Middleware::handle` with recording doubles
//! for the response and the logger.

use fieldgate::middleware::UNPROCESSABLE_ENTITY;
use fieldgate::prelude::*;
use fieldgate::testing::{MockLogger, MockResponse};
use serde_json::{json, Value};

struct Run {
    called_next: bool,
    response: MockResponse,
    logged: Vec<Value>,
}

fn run(schema: Schema, request: Value) -> Run {
    let middleware = validate(schema).middleware().with_logger(MockLogger::new());
    let mut response = MockResponse::new();
    let mut called_next = false;

    middleware
        .handle(&request, &mut response, || called_next = true)
        .expect("rules should evaluate");

    Run {
        called_next,
        response,
        logged: middleware.logger().payloads(),
    }
}

fn assert_passes(run: &Run) {
    assert!(run.called_next, "next was not called");
    assert_eq!(run.response.status_code(), None);
    assert_eq!(run.response.send_count(), 0);
    assert!(run.logged.is_empty());
}

fn assert_rejected(run: &Run, expected: Value) {
    assert!(!run.called_next, "next was called");
    assert_eq!(run.logged, [expected.clone()]);
    assert_eq!(run.response.status_code(), Some(UNPROCESSABLE_ENTITY));
    let body: Value = serde_json::from_str(run.response.body().unwrap()).unwrap();
    assert_eq!(body, expected);
}

mod presence {
    use super::*;

    fn schema() -> Schema {
        Schema::new().field("startTime", FieldSpec::new().presence())
    }

    #[test]
    fn test_calls_next_when_valid() {
        assert_passes(&run(schema(), json!({"params": {"startTime": 1}})));
    }

    #[test]
    fn test_writes_422_when_invalid() {
        let run = run(schema(), json!({"params": {}}));
        assert_rejected(&run, json!({"errors": {"startTime": ["must be present"]}}));
        assert_eq!(
            run.response.body(),
            Some(r#"{"errors":{"startTime":["must be present"]}}"#)
        );
    }
}

mod custom {
    use super::*;

    fn schema() -> Schema {
        Schema::new().field(
            "startTime",
            FieldSpec::new()
                .custom(|v| (v != Some(&json!(1))).then(|| "start time not 1".to_string())),
        )
    }

    #[test]
    fn test_calls_next_when_valid() {
        assert_passes(&run(schema(), json!({"params": {"startTime": 1}})));
    }

    #[test]
    fn test_writes_422_when_invalid() {
        assert_rejected(
            &run(schema(), json!({"params": {"startTime": 2}})),
            json!({"errors": {"startTime": ["start time not 1"]}}),
        );
    }
}

mod one_of {
    use super::*;

    fn schema() -> Schema {
        Schema::new().field("startTime", FieldSpec::new().one_of([1, 3]))
    }

    #[test]
    fn test_calls_next_when_valid() {
        for value in [1, 3] {
            assert_passes(&run(schema(), json!({"params": {"startTime": value}})));
        }
    }

    #[test]
    fn test_writes_422_when_missing() {
        assert_rejected(
            &run(schema(), json!({"params": {}})),
            json!({"errors": {"startTime": ["undefined must be one of (1,3)"]}}),
        );
    }

    #[test]
    fn test_writes_422_when_not_listed() {
        assert_rejected(
            &run(schema(), json!({"params": {"startTime": 2}})),
            json!({"errors": {"startTime": ["2 must be one of (1,3)"]}}),
        );
    }
}

mod between {
    use super::*;

    fn schema() -> Schema {
        Schema::new().field("startTime", FieldSpec::new().between(0, 2))
    }

    #[test]
    fn test_calls_next_when_valid() {
        assert_passes(&run(schema(), json!({"params": {"startTime": 1}})));
    }

    #[test]
    fn test_writes_422_when_below_low() {
        assert_rejected(
            &run(schema(), json!({"params": {"startTime": -1}})),
            json!({"errors": {"startTime": ["-1 must be between 0 and 2"]}}),
        );
    }

    #[test]
    fn test_writes_422_when_above_high() {
        assert_rejected(
            &run(schema(), json!({"params": {"startTime": 3}})),
            json!({"errors": {"startTime": ["3 must be between 0 and 2"]}}),
        );
    }

    #[test]
    fn test_writes_422_when_missing() {
        assert_rejected(
            &run(schema(), json!({"params": {}})),
            json!({"errors": {"startTime": ["undefined must be between 0 and 2"]}}),
        );
    }
}

mod target {
    use super::*;

    #[test]
    fn test_reads_the_declared_bag() {
        let schema =
            Schema::new().field("startTime", FieldSpec::new().presence().with_target("query"));
        assert_passes(&run(schema, json!({"query": {"startTime": 1}})));
    }

    #[test]
    fn test_default_bag_is_params() {
        let schema = Schema::new().field("startTime", FieldSpec::new().presence());
        assert_rejected(
            &run(schema, json!({"query": {"startTime": 1}})),
            json!({"errors": {"startTime": ["must be present"]}}),
        );
    }
}

mod allow_blank {
    use super::*;

    fn schema() -> Schema {
        Schema::new().field("startTime", FieldSpec::new().presence().allow_blank())
    }

    #[test]
    fn test_skips_when_the_target_is_missing() {
        assert_passes(&run(schema(), json!({})));
    }

    #[test]
    fn test_skips_when_the_target_is_null() {
        assert_passes(&run(schema(), json!({"params": null})));
    }

    #[test]
    fn test_skips_when_the_target_has_no_keys() {
        assert_passes(&run(schema(), json!({"params": {}})));
    }

    #[test]
    fn test_skips_when_the_value_is_null() {
        assert_passes(&run(schema(), json!({"params": {"startTime": null}})));
    }

    #[test]
    fn test_without_allow_blank_every_case_fails() {
        let schema = Schema::new().field("startTime", FieldSpec::new().presence());
        for request in [
            json!({}),
            json!({"params": {}}),
            json!({"params": {"startTime": null}}),
        ] {
            assert_rejected(
                &run(schema.clone(), request),
                json!({"errors": {"startTime": ["must be present"]}}),
            );
        }
    }

    #[test]
    fn test_still_validates_present_values() {
        let schema = Schema::new().field(
            "startTime",
            FieldSpec::new()
                .allow_blank()
                .custom(|v| (v != Some(&json!(1))).then(|| "start time not 1".to_string())),
        );
        assert_rejected(
            &run(schema, json!({"params": {"startTime": 2}})),
            json!({"errors": {"startTime": ["start time not 1"]}}),
        );
    }

    #[test]
    fn test_zero_is_present() {
        let schema =
            Schema::new().field("startTime", FieldSpec::new().allow_blank().one_of([1, 3]));
        assert_rejected(
            &run(schema, json!({"params": {"startTime": 0}})),
            json!({"errors": {"startTime": ["0 must be one of (1,3)"]}}),
        );
    }
}

mod multiple_failures {
    use super::*;

    #[test]
    fn test_sends_every_message_in_declaration_order() {
        let schema = Schema::new()
            .field("startTime", FieldSpec::new().presence())
            .field("endTime", FieldSpec::new().presence().between(0, 2));

        let run = run(schema, json!({"params": {}}));

        assert_rejected(
            &run,
            json!({"errors": {
                "startTime": ["must be present"],
                "endTime": ["must be present", "undefined must be between 0 and 2"]
            }}),
        );
        assert_eq!(
            run.response.body(),
            Some(
                r#"{"errors":{"startTime":["must be present"],"endTime":["must be present","undefined must be between 0 and 2"]}}"#
            )
        );
    }
}

mod declarative {
    use super::*;

    #[test]
    fn test_json_schema_behaves_like_builder_schema() {
        let schema = Schema::from_json_str(
            r#"{
                "startTime": {"presence": true},
                "endTime": {"presence": true, "between": [0, 2]},
                "sort": {"in": ["asc", "desc"], "target": "query", "allowBlank": true, "label": "Sort"}
            }"#,
        )
        .unwrap();

        assert_passes(&run(
            schema.clone(),
            json!({"params": {"startTime": 5, "endTime": 2}}),
        ));
        assert_rejected(
            &run(
                schema,
                json!({"params": {"startTime": 5}, "query": {"sort": "up"}}),
            ),
            json!({"errors": {
                "endTime": ["must be present", "undefined must be between 0 and 2"],
                "sort": ["up must be one of (asc,desc)"]
            }}),
        );
    }
}

mod rule_errors {
    use super::*;

    #[test]
    fn test_malformed_options_are_reported_as_validator_errors() {
        let schema = Schema::new().field("startTime", FieldSpec::new().rule("between", true));
        let mut response = MockResponse::new();

        let err = validate(schema)
            .middleware()
            .handle(&json!({"params": {"startTime": 1}}), &mut response, || ())
            .unwrap_err();

        assert_eq!(err.field(), "startTime");
        assert_eq!(err.rule(), "between");
        assert!(!err.is_predicate());
        assert_eq!(response.send_count(), 0);
    }
}
