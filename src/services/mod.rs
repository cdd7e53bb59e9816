//! Dependent-service model
//!
//! A dependent service is a piece of backing infrastructure (database,
//! broker, search engine) an application needs at runtime. Services are
//! inferred, not declared, so every entry is a suggestion carrying
//! ready-to-use container defaults.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

mod infer;

pub use infer::{Inference, Inferencer};

/// Kinds of backing services the inferencer can suggest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceKind {
    Mysql,
    Postgres,
    Mongodb,
    Redis,
    Kafka,
    Rabbitmq,
    Elasticsearch,
}

impl ServiceKind {
    pub const ALL: &'static [ServiceKind] = &[
        ServiceKind::Mysql,
        ServiceKind::Postgres,
        ServiceKind::Mongodb,
        ServiceKind::Redis,
        ServiceKind::Kafka,
        ServiceKind::Rabbitmq,
        ServiceKind::Elasticsearch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceKind::Mysql => "mysql",
            ServiceKind::Postgres => "postgres",
            ServiceKind::Mongodb => "mongodb",
            ServiceKind::Redis => "redis",
            ServiceKind::Kafka => "kafka",
            ServiceKind::Rabbitmq => "rabbitmq",
            ServiceKind::Elasticsearch => "elasticsearch",
        }
    }

    pub fn default_port(&self) -> &'static str {
        match self {
            ServiceKind::Mysql => "3306",
            ServiceKind::Postgres => "5432",
            ServiceKind::Mongodb => "27017",
            ServiceKind::Redis => "6379",
            ServiceKind::Kafka => "9092",
            ServiceKind::Rabbitmq => "5672",
            ServiceKind::Elasticsearch => "9200",
        }
    }

    /// Container image the compose renderer uses
    pub fn default_image(&self) -> &'static str {
        match self {
            ServiceKind::Mysql => "mysql",
            ServiceKind::Postgres => "postgres",
            ServiceKind::Mongodb => "mongo",
            ServiceKind::Redis => "redis",
            ServiceKind::Kafka => "apache/kafka",
            ServiceKind::Rabbitmq => "rabbitmq",
            ServiceKind::Elasticsearch => "elasticsearch",
        }
    }

    /// Environment defaults a local dev container needs to come up
    pub fn default_env(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            ServiceKind::Mysql => &[
                ("MYSQL_ROOT_PASSWORD", "root"),
                ("MYSQL_DATABASE", "appdb"),
            ],
            ServiceKind::Postgres => &[
                ("POSTGRES_USER", "postgres"),
                ("POSTGRES_PASSWORD", "postgres"),
                ("POSTGRES_DB", "appdb"),
            ],
            ServiceKind::Mongodb => &[
                ("MONGO_INITDB_ROOT_USERNAME", "root"),
                ("MONGO_INITDB_ROOT_PASSWORD", "root"),
            ],
            ServiceKind::Redis => &[],
            ServiceKind::Kafka => &[],
            ServiceKind::Rabbitmq => &[
                ("RABBITMQ_DEFAULT_USER", "guest"),
                ("RABBITMQ_DEFAULT_PASS", "guest"),
            ],
            ServiceKind::Elasticsearch => &[
                ("discovery.type", "single-node"),
                ("xpack.security.enabled", "false"),
            ],
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One inferred backing service with its container defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(rename = "type")]
    pub kind: ServiceKind,
    pub version: String,
    pub port: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub env: BTreeMap<String, String>,
}

impl ServiceConfig {
    pub fn with_defaults(kind: ServiceKind) -> Self {
        Self {
            kind,
            version: "latest".to_string(),
            port: kind.default_port().to_string(),
            env: kind
                .default_env()
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yare::parameterized;

    #[parameterized(
        mysql = { ServiceKind::Mysql, "3306" },
        postgres = { ServiceKind::Postgres, "5432" },
        mongodb = { ServiceKind::Mongodb, "27017" },
        redis = { ServiceKind::Redis, "6379" },
        kafka = { ServiceKind::Kafka, "9092" },
        rabbitmq = { ServiceKind::Rabbitmq, "5672" },
        elasticsearch = { ServiceKind::Elasticsearch, "9200" },
    )]
    fn test_default_ports(kind: ServiceKind, port: &str) {
        assert_eq!(kind.default_port(), port);
        let config = ServiceConfig::with_defaults(kind);
        assert_eq!(config.port, port);
        assert_eq!(config.version, "latest");
    }

    #[test]
    fn test_mysql_credentials() {
        let config = ServiceConfig::with_defaults(ServiceKind::Mysql);
        assert_eq!(config.env.get("MYSQL_ROOT_PASSWORD").map(String::as_str), Some("root"));
        assert!(config.env.contains_key("MYSQL_DATABASE"));
    }

    #[test]
    fn test_redis_has_no_credentials() {
        let config = ServiceConfig::with_defaults(ServiceKind::Redis);
        assert!(config.env.is_empty());
    }

    #[test]
    fn test_kind_serde_lowercase() {
        assert_eq!(
            serde_yaml::to_string(&ServiceKind::Elasticsearch).unwrap().trim(),
            "elasticsearch"
        );
        let parsed: ServiceKind = serde_yaml::from_str("rabbitmq").unwrap();
        assert_eq!(parsed, ServiceKind::Rabbitmq);
    }
}
