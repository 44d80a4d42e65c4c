use anyhow::{Context, Result, anyhow};
use shared::config::{KafkaConfig, QueueConfig, SqsConfig};
use std::{str::FromStr, time::Duration};

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub min_connections: u32,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub run_migrations: bool,
    pub port: u16,
    pub request_timeout: Duration,
    pub publish_timeout: Duration,
    pub queue: QueueConfig,
    pub otel_endpoint: Option<String>,
    pub is_dev: bool,
    pub enable_file_log: bool,
}

impl Config {
    pub fn init() -> Result<Self> {
        Self::from_env(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `init` uses the process
    /// environment.
    pub fn from_env<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let database = DatabaseConfig {
            url: env.required("DATABASE_URL")?,
            min_connections: env.parse_or("DB_MIN_CONN", 1)?,
            max_connections: env.parse_or("DB_MAX_CONN", 10)?,
            acquire_timeout: Duration::from_secs(env.parse_or("DB_ACQUIRE_TIMEOUT_SECS", 5)?),
        };

        if database.min_connections > database.max_connections {
            return Err(anyhow!(
                "DB_MIN_CONN ({}) must not exceed DB_MAX_CONN ({})",
                database.min_connections,
                database.max_connections
            ));
        }

        let run_migrations = match env.get("RUN_MIGRATIONS").as_deref() {
            None | Some("true") => true,
            Some("false") => false,
            Some(other) => {
                return Err(anyhow!(
                    "RUN_MIGRATIONS must be 'true' or 'false', got '{}'",
                    other
                ));
            }
        };

        let port = env.parse_or("PORT", 8080u16)?;
        let request_timeout = Duration::from_millis(env.parse_or("REQUEST_TIMEOUT_MS", 10_000)?);
        let publish_timeout = Duration::from_millis(env.parse_or("PUBLISH_TIMEOUT_MS", 3_000)?);

        // Acquire and publish deadlines must both fit inside the request deadline.
        if database.acquire_timeout + publish_timeout >= request_timeout {
            return Err(anyhow!(
                "DB_ACQUIRE_TIMEOUT_SECS ({:?}) + PUBLISH_TIMEOUT_MS ({:?}) must be less than REQUEST_TIMEOUT_MS ({:?})",
                database.acquire_timeout,
                publish_timeout,
                request_timeout
            ));
        }

        let queue_name = env.get("QUEUE_NAME").unwrap_or_else(|| "estore".to_string());

        let queue = match env.get("QUEUE_BACKEND").as_deref() {
            None | Some("sqs") => QueueConfig::Sqs(SqsConfig {
                queue_name,
                region: env.required("AWS_REGION")?,
                access_key_id: env.required("AWS_ACCESS_KEY_ID")?,
                secret_access_key: env.required("AWS_SECRET_ACCESS_KEY")?,
                endpoint_url: env.get("AWS_ENDPOINT_URL"),
            }),
            Some("kafka") => QueueConfig::Kafka(KafkaConfig {
                brokers: env.required("KAFKA")?,
                topic: queue_name,
                group_id: env
                    .get("KAFKA_GROUP_ID")
                    .unwrap_or_else(|| "estore-service".to_string()),
            }),
            Some("memory") => QueueConfig::Memory,
            Some(other) => {
                return Err(anyhow!(
                    "QUEUE_BACKEND must be 'sqs', 'kafka' or 'memory', got '{}'",
                    other
                ));
            }
        };

        Ok(Self {
            database,
            run_migrations,
            port,
            request_timeout,
            publish_timeout,
            queue,
            otel_endpoint: env.get("OTEL_EXPORTER_OTLP_ENDPOINT"),
            is_dev: env.flag("DEV_MODE"),
            enable_file_log: env.flag("ENABLE_FILE_LOG"),
        })
    }
}

struct Env<F>(F);

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Unset and blank are treated the same.
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    fn required(&self, key: &str) -> Result<String> {
        self.get(key)
            .with_context(|| format!("Missing environment variable: {key}"))
    }

    fn parse_or<T>(&self, key: &str, default: T) -> Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        match self.get(key) {
            Some(raw) => raw
                .trim()
                .parse::<T>()
                .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
            None => Ok(default),
        }
    }

    fn flag(&self, key: &str) -> bool {
        self.get(key)
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_env(|key| vars.get(key).cloned())
    }

    const MEMORY: &[(&str, &str)] = &[
        ("DATABASE_URL", "postgres://localhost/estore"),
        ("QUEUE_BACKEND", "memory"),
    ];

    #[test]
    fn test_defaults_apply() {
        let config = config_from(MEMORY).unwrap();

        assert_eq!(config.port, 8080);
        assert!(config.run_migrations);
        assert_eq!(config.database.min_connections, 1);
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.database.acquire_timeout, Duration::from_secs(5));
        assert_eq!(config.request_timeout, Duration::from_millis(10_000));
        assert_eq!(config.publish_timeout, Duration::from_millis(3_000));
        assert!(matches!(config.queue, QueueConfig::Memory));
        assert!(config.otel_endpoint.is_none());
        assert!(!config.is_dev);
    }

    #[test]
    fn test_database_url_is_required() {
        let err = config_from(&[("QUEUE_BACKEND", "memory")]).unwrap_err();

        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn test_sqs_is_the_default_backend() {
        let config = config_from(&[
            ("DATABASE_URL", "postgres://localhost/estore"),
            ("AWS_REGION", "us-east-1"),
            ("AWS_ACCESS_KEY_ID", "key"),
            ("AWS_SECRET_ACCESS_KEY", "secret"),
            ("AWS_ENDPOINT_URL", "http://localhost:4566"),
        ])
        .unwrap();

        match config.queue {
            QueueConfig::Sqs(sqs) => {
                assert_eq!(sqs.queue_name, "estore");
                assert_eq!(sqs.region, "us-east-1");
                assert_eq!(sqs.endpoint_url.as_deref(), Some("http://localhost:4566"));
            }
            other => panic!("expected SQS, got {other:?}"),
        }
    }

    #[test]
    fn test_sqs_needs_credentials() {
        let err = config_from(&[
            ("DATABASE_URL", "postgres://localhost/estore"),
            ("AWS_REGION", "us-east-1"),
        ])
        .unwrap_err();

        assert!(err.to_string().contains("AWS_ACCESS_KEY_ID"));
    }

    #[test]
    fn test_kafka_backend() {
        let config = config_from(&[
            ("DATABASE_URL", "postgres://localhost/estore"),
            ("QUEUE_BACKEND", "kafka"),
            ("KAFKA", "kafka:9092"),
            ("QUEUE_NAME", "catalog"),
        ])
        .unwrap();

        match config.queue {
            QueueConfig::Kafka(kafka) => {
                assert_eq!(kafka.brokers, "kafka:9092");
                assert_eq!(kafka.topic, "catalog");
                assert_eq!(kafka.group_id, "estore-service");
            }
            other => panic!("expected Kafka, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut pairs = MEMORY.to_vec();
        pairs.push(("PORT", "eighty"));
        assert!(config_from(&pairs).is_err());

        let mut pairs = MEMORY.to_vec();
        pairs.push(("RUN_MIGRATIONS", "yes"));
        assert!(config_from(&pairs).is_err());

        let mut pairs = MEMORY.to_vec();
        pairs.push(("QUEUE_BACKEND", "rabbit"));
        assert!(config_from(&pairs).is_err());

        let mut pairs = MEMORY.to_vec();
        pairs.extend([("DB_MIN_CONN", "20"), ("DB_MAX_CONN", "5")]);
        assert!(config_from(&pairs).is_err());
    }

    #[test]
    fn test_publish_budget_must_fit_request_deadline() {
        let mut pairs = MEMORY.to_vec();
        pairs.extend([("PUBLISH_TIMEOUT_MS", "20000"), ("REQUEST_TIMEOUT_MS", "1000")]);
        let err = config_from(&pairs).unwrap_err();
        assert!(err.to_string().contains("REQUEST_TIMEOUT_MS"));

        let mut pairs = MEMORY.to_vec();
        pairs.extend([
            ("DB_ACQUIRE_TIMEOUT_SECS", "5"),
            ("PUBLISH_TIMEOUT_MS", "5000"),
            ("REQUEST_TIMEOUT_MS", "10000"),
        ]);
        assert!(config_from(&pairs).is_err());

        let mut pairs = MEMORY.to_vec();
        pairs.extend([
            ("DB_ACQUIRE_TIMEOUT_SECS", "1"),
            ("PUBLISH_TIMEOUT_MS", "500"),
            ("REQUEST_TIMEOUT_MS", "2000"),
        ]);
        let config = config_from(&pairs).unwrap();
        assert_eq!(config.publish_timeout, Duration::from_millis(500));
    }
}
