use std::path::{Path, PathBuf};

use anyhow::bail;
use itertools::Itertools;
use serde::{de::{Error, Visitor}, Deserialize, Serialize};

use crate::ast::Value;

const TESTCASES: usize = 7;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TestOutput {
    Number(i64),
    Rendered(String), // Compared against the value's display form
}

impl TestOutput {
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::Number(expected), Value::Number(number)) => expected == number,
            (Self::Rendered(expected), value) => expected == &value.to_string(),
            _ => false
        }
    }
}

#[derive(Debug, Clone)]
pub enum TestEvaluationResult {
    Ok(TestOutput),
    Err(String),
}

impl TestEvaluationResult {
    pub fn as_error(&self) -> Option<&str> {
        match self {
            Self::Ok(_) => None,
            Self::Err(message) => Some(message)
        }
    }
}

struct TestEvaluationResultVisitor {}

impl<'de> Deserialize<'de> for TestEvaluationResult {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: serde::Deserializer<'de> {

        deserializer.deserialize_map(TestEvaluationResultVisitor {})
    }
}

impl<'de> Visitor<'de> for TestEvaluationResultVisitor {
    type Value = TestEvaluationResult;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(formatter, "A structure containing the boolean key 'ok'. If it's okay, contains the key 'output', otherwise the key 'error'")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: serde::de::MapAccess<'de>, {

        if map.next_key::<String>()? != Some("ok".to_owned()) {
            return Err(A::Error::custom("First key should be 'ok'"))
        }

        let ok: bool = map.next_value()?;
        let second_key = map.next_key::<String>()?
            .ok_or(A::Error::custom("Must have two keys"))?;

        let result = if ok {
            if second_key != "output" {
                return Err(A::Error::custom("Second key of a success should be 'output'"))
            }
            TestEvaluationResult::Ok(map.next_value()?)
        } else {
            if second_key != "error" {
                return Err(A::Error::custom("Second key of a failure should be 'error'"))
            }
            TestEvaluationResult::Err(map.next_value()?)
        };

        if map.next_key::<String>()? != None {
            return Err(A::Error::custom("Only two keys should be present"));
        }

        Ok(result)
    }
}

fn load_input_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<String>> {
    let source = std::fs::read_to_string(path)?;
    Ok(source.lines().map(str::to_owned).collect_vec())
}

fn load_output_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<TestEvaluationResult>> {
    let source = std::fs::read(path)?;
    let result: Vec<TestEvaluationResult> = serde_json::from_slice(&source)?;
    Ok(result)
}

pub fn load_test_pair(testcase: usize) -> anyhow::Result<Vec<(String, TestEvaluationResult)>> {
    if testcase < 1 || testcase > TESTCASES { bail!("Testcase out of bounds"); }

    let base_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let input = load_input_file(base_path.join("test_inputs").join(format!("{}.curry", testcase)))?;
    let output = load_output_file(base_path.join("test_outputs").join(format!("{}.json", testcase)))?;

    if input.len() != output.len() { bail!("Input and output of testcase {} does not match", testcase); }
    Ok(input.into_iter().zip(output.into_iter()).collect_vec())
}

pub fn all_testcases() -> impl Iterator<Item = usize> {
    1..=TESTCASES
}
