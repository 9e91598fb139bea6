//! Child-result aggregation shared by the container validators.
//!
//! One failing child is re-raised as-is with its path prefixed; two or more
//! become a single `CONTENT_INCORRECT` failure with per-child `details`.

use runtypes_value::Value;

use crate::foundation::{Details, Failcode, Failure, PathSegment, Validation};

pub(crate) struct Aggregate {
    failures: Details,
    outputs: Vec<(PathSegment, Value)>,
    transformed: bool,
}

impl Aggregate {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            failures: Details::new(),
            outputs: Vec::with_capacity(capacity),
            transformed: false,
        }
    }

    /// Records the outcome of validating the child `input` at `segment`.
    pub(crate) fn record(&mut self, segment: PathSegment, input: &Value, result: Validation) {
        match result {
            Ok(output) => {
                if !output.same_value(input) {
                    self.transformed = true;
                }
                self.outputs.push((segment, output));
            }
            Err(failure) => {
                self.failures.insert(segment.clone(), failure);
                self.outputs.push((segment, input.clone()));
            }
        }
    }

    /// Records a child that is carried over without validation.
    pub(crate) fn pass(&mut self, segment: PathSegment, input: &Value) {
        self.outputs.push((segment, input.clone()));
    }

    /// Records a failure that has no validated output (missing or unexpected keys).
    pub(crate) fn fail(&mut self, segment: PathSegment, failure: Failure) {
        self.failures.insert(segment, failure);
    }

    /// Concludes the container check.
    ///
    /// `message` receives the number of failing children. `rebuild` is only
    /// called when some child was transformed; otherwise `original` is
    /// returned and keeps its identity.
    pub(crate) fn finish(
        mut self,
        original: &Value,
        message: impl FnOnce(usize) -> String,
        rebuild: impl FnOnce(Vec<(PathSegment, Value)>) -> Value,
    ) -> Validation {
        match self.failures.len() {
            0 if self.transformed => Ok(rebuild(self.outputs)),
            0 => Ok(original.clone()),
            1 => match self.failures.pop() {
                Some((segment, failure)) => Err(failure.prefixed(segment)),
                None => Ok(original.clone()),
            },
            n => Err(Failure::new(Failcode::ContentIncorrect, message(n)).with_details(self.failures)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rebuild(outputs: Vec<(PathSegment, Value)>) -> Value {
        Value::array(outputs.into_iter().map(|(_, v)| v))
    }

    #[test]
    fn no_failures_keeps_identity() {
        let original = Value::array([Value::from(1)]);
        let mut agg = Aggregate::with_capacity(1);
        agg.record(PathSegment::Index(0), &Value::from(1), Ok(Value::from(1)));
        let out = agg.finish(&original, |_| String::new(), rebuild).unwrap();
        assert!(out.same_value(&original));
    }

    #[test]
    fn transformed_child_rebuilds() {
        let original = Value::array([Value::from("1")]);
        let mut agg = Aggregate::with_capacity(1);
        agg.record(PathSegment::Index(0), &Value::from("1"), Ok(Value::from(1)));
        let out = agg.finish(&original, |_| String::new(), rebuild).unwrap();
        assert!(!out.same_value(&original));
        assert_eq!(out.to_string(), "[1]");
    }

    #[test]
    fn single_failure_is_prefixed() {
        let mut agg = Aggregate::with_capacity(2);
        agg.record(PathSegment::Index(0), &Value::Null, Ok(Value::Null));
        agg.record(
            PathSegment::Index(1),
            &Value::Null,
            Err(Failure::new(Failcode::TypeIncorrect, "bad")),
        );
        let failure = agg.finish(&Value::Null, |_| String::new(), rebuild).unwrap_err();
        assert_eq!(failure.code, Failcode::TypeIncorrect);
        assert_eq!(failure.key().as_deref(), Some("[1]"));
        assert!(failure.details.is_none());
    }

    #[test]
    fn several_failures_aggregate() {
        let mut agg = Aggregate::with_capacity(2);
        for i in 0..2 {
            agg.record(
                PathSegment::Index(i),
                &Value::Null,
                Err(Failure::new(Failcode::TypeIncorrect, "bad")),
            );
        }
        let failure = agg
            .finish(&Value::Null, |n| format!("{n} failed"), rebuild)
            .unwrap_err();
        assert_eq!(failure.code, Failcode::ContentIncorrect);
        assert_eq!(failure.message, "2 failed");
        assert_eq!(failure.details.map(|d| d.len()), Some(2));
    }
}
