//! Request and response bodies of the tutor HTTP surface

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Body of `POST /ask`
///
/// `question` is optional at the wire level so that a missing or `null`
/// field reaches validation instead of failing to decode. The body itself
/// must be a JSON object; arrays and scalars are decode errors.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AskRequest {
    pub question: Option<String>,
}

impl<'de> Deserialize<'de> for AskRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct AskRequestVisitor;

        impl<'de> Visitor<'de> for AskRequestVisitor {
            type Value = AskRequest;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A>(self, mut map: A) -> Result<AskRequest, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut question: Option<Option<String>> = None;

                while let Some(key) = map.next_key::<String>()? {
                    if key == "question" {
                        if question.is_some() {
                            return Err(de::Error::duplicate_field("question"));
                        }
                        question = Some(map.next_value()?);
                    } else {
                        map.next_value::<IgnoredAny>()?;
                    }
                }

                Ok(AskRequest {
                    question: question.flatten(),
                })
            }
        }

        deserializer.deserialize_map(AskRequestVisitor)
    }
}

/// Successful `POST /ask` response
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AskResponse {
    pub answer: String,
}

/// `GET /health` response
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

impl HealthResponse {
    pub fn running() -> Self {
        Self {
            status: "running".to_string(),
            message: "GCSE Maths Agent is live!".to_string(),
        }
    }
}
