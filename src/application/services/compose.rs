//! docker-compose 改写服务
//!
//! 根据合并后的 .env 文件，为模板中的每个服务生成 `environment` 引用和 `ports` 映射

use crate::domain::models::{ComposeDocument, EnvVar};
use crate::infrastructure::dotenv::DotenvParser;
use crate::infrastructure::paths::ProjectRoot;
use crate::infrastructure::registry::ServiceRegistry;
use std::collections::HashSet;
use std::path::PathBuf;

/// 总是视为外部服务的名称（除注册表中的公共服务外）
pub const BUILTIN_EXTERNAL_SERVICES: [&str; 4] = ["db", "mongo", "elastic", "mail"];

/// 端口变量的命名约定
const PORT_MARKER: &str = "_PORT";

/// 合并后的变量表（保留文件顺序）
#[derive(Debug, Clone, Default)]
pub struct ConsolidatedEnv {
    vars: Vec<EnvVar>,
    keys: HashSet<String>,
}

impl ConsolidatedEnv {
    /// 解析合并后的 .env 文件内容，键名不做任何前缀处理
    #[must_use]
    pub fn parse(content: &str) -> Self {
        let vars = DotenvParser::parse_unique(content);
        let keys = vars.iter().map(|v| v.key.clone()).collect();
        Self { vars, keys }
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.vars.iter().map(|v| v.key.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

/// 单个服务的改写结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceRewrite {
    /// 找不到服务自己的 env 文件，字段保持不变
    Skipped,
    Rewritten {
        environment: usize,
        ports: usize,
    },
}

/// docker-compose 改写器
pub struct ComposeRewriter<'a> {
    registry: &'a ServiceRegistry,
    root: &'a ProjectRoot,
    discover_dir: Option<PathBuf>,
    exclusions: Vec<String>,
}

impl<'a> ComposeRewriter<'a> {
    pub fn new(
        registry: &'a ServiceRegistry,
        root: &'a ProjectRoot,
        discover_dir: Option<PathBuf>,
    ) -> Self {
        let exclusions = registry
            .common_names()
            .map(str::to_string)
            .chain(BUILTIN_EXTERNAL_SERVICES.iter().map(|s| s.to_string()))
            .collect();

        Self {
            registry,
            root,
            discover_dir,
            exclusions,
        }
    }

    /// 服务自己的 env 文件路径，未注册的服务返回 `None`
    ///
    /// 指定了发现目录时为 `{discover_dir}/{env_file}`，否则按项目根目录解析注册表中的路径
    #[must_use]
    pub fn service_env_file(&self, service: &str) -> Option<PathBuf> {
        let (entry, _) = self.registry.lookup(service)?;

        Some(match &self.discover_dir {
            Some(dir) => dir.join(&entry.env_file),
            None => self.root.resolve(&entry.env_file),
        })
    }

    /// 改写文档中的所有服务
    pub fn rewrite(
        &self,
        doc: &mut ComposeDocument,
        consolidated: &ConsolidatedEnv,
    ) -> Vec<(String, ServiceRewrite)> {
        if !doc.has_services() {
            tracing::warn!("模板中没有 services 定义，保持原样");
            return Vec::new();
        }

        doc.service_names()
            .into_iter()
            .map(|name| {
                println!("处理服务: {}", name);
                let outcome = self.rewrite_service(doc, &name, consolidated);
                (name, outcome)
            })
            .collect()
    }

    /// 改写单个服务的 `environment` 和 `ports`
    pub fn rewrite_service(
        &self,
        doc: &mut ComposeDocument,
        service: &str,
        consolidated: &ConsolidatedEnv,
    ) -> ServiceRewrite {
        let Some(env_file) = self.service_env_file(service) else {
            tracing::warn!(service, "服务未在配置中注册，跳过");
            return ServiceRewrite::Skipped;
        };

        let service_vars = match crate::infrastructure::paths::read_file(&env_file) {
            Ok(content) => DotenvParser::parse_unique(&content),
            Err(e) => {
                tracing::warn!(service, path = %env_file.display(), error = %e, "无法读取服务 env 文件，跳过");
                return ServiceRewrite::Skipped;
            }
        };

        let prefix = self.registry.prefix_of(service);
        tracing::debug!(service, prefix, "查找带前缀的环境变量");

        let environment = environment_entries(prefix, &service_vars, consolidated);
        let environment_count = environment.len();
        if environment.is_empty() {
            println!("  服务 {} 没有可映射的环境变量", service);
        } else {
            doc.set_environment(service, environment);
            println!("  已更新服务 {} 的环境变量引用", service);
        }

        let ports = port_mappings(service, prefix, consolidated, &self.exclusions);
        let ports_count = ports.len();
        if ports.is_empty() {
            println!("  服务 {} 没有端口变量", service);
        } else {
            doc.set_ports(service, ports);
            println!("  为服务 {} 设置了 {} 个端口映射", service, ports_count);
        }

        ServiceRewrite::Rewritten {
            environment: environment_count,
            ports: ports_count,
        }
    }
}

/// 生成服务的 `environment` 条目
///
/// 合并文件中存在 `{prefix}{KEY}` 时引用它，否则引用同名的无前缀变量
#[must_use]
pub fn environment_entries(
    prefix: &str,
    service_vars: &[EnvVar],
    consolidated: &ConsolidatedEnv,
) -> Vec<String> {
    service_vars
        .iter()
        .map(|var| {
            let prefixed = format!("{}{}", prefix, var.key);
            if consolidated.contains(&prefixed) {
                format!("{}=${{{}}}", var.key, prefixed)
            } else {
                format!("{}=${{{}}}", var.key, var.key)
            }
        })
        .collect()
}

/// 生成服务的 `ports` 映射
///
/// 候选变量以服务前缀开头且包含 `_PORT`；小写形式包含其他外部服务名称的变量被排除
#[must_use]
pub fn port_mappings(
    service: &str,
    prefix: &str,
    consolidated: &ConsolidatedEnv,
    exclusions: &[String],
) -> Vec<String> {
    consolidated
        .keys()
        .filter(|key| key.starts_with(prefix) && key.contains(PORT_MARKER))
        .filter(|key| {
            let lower = key.to_lowercase();
            let external = exclusions
                .iter()
                .find(|name| lower.contains(name.as_str()) && name.as_str() != service);

            if let Some(name) = external {
                tracing::debug!(service, key, external = %name, "跳过外部服务端口");
                return false;
            }
            true
        })
        .map(|key| format!("${{{key}}}:${{{key}}}"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::ServiceEntry;
    use crate::test_utils::ServiceTree;
    use serde_yaml::Value;

    fn exclusions(common: &[&str]) -> Vec<String> {
        common
            .iter()
            .chain(BUILTIN_EXTERNAL_SERVICES.iter())
            .map(|s| s.to_string())
            .collect()
    }

    fn strings(value: Option<&Value>) -> Vec<String> {
        value
            .and_then(Value::as_sequence)
            .map(|seq| {
                seq.iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }

    #[test]
    fn test_environment_prefers_prefixed() {
        let consolidated = ConsolidatedEnv::parse("WEB_HOST= 0.0.0.0\nTIMEOUT= 30");
        let vars = vec![EnvVar::new("HOST", "x"), EnvVar::new("TIMEOUT", "5")];

        let entries = environment_entries("WEB_", &vars, &consolidated);

        assert_eq!(entries, vec!["HOST=${WEB_HOST}", "TIMEOUT=${TIMEOUT}"]);
    }

    #[test]
    fn test_environment_fallback_self_reference() {
        let consolidated = ConsolidatedEnv::parse("");
        let entries = environment_entries("WEB_", &[EnvVar::new("TIMEOUT", "5")], &consolidated);
        assert_eq!(entries, vec!["TIMEOUT=${TIMEOUT}"]);
    }

    #[test]
    fn test_port_exclusion() {
        let consolidated = ConsolidatedEnv::parse("WEB_DB_PORT= 5432\nWEB_APP_PORT= 8080\nWEB_HOST= h");

        let ports = port_mappings("web", "WEB_", &consolidated, &exclusions(&["db"]));

        assert_eq!(ports, vec!["${WEB_APP_PORT}:${WEB_APP_PORT}"]);
    }

    #[test]
    fn test_port_own_name_not_excluded() {
        let consolidated = ConsolidatedEnv::parse("DB_PORT= 5432\nDB_ADMIN_PORT= 8081");

        let ports = port_mappings("db", "DB_", &consolidated, &exclusions(&["db"]));

        assert_eq!(
            ports,
            vec!["${DB_PORT}:${DB_PORT}", "${DB_ADMIN_PORT}:${DB_ADMIN_PORT}"]
        );
    }

    #[test]
    fn test_port_builtin_exclusions() {
        let consolidated =
            ConsolidatedEnv::parse("API_MONGO_PORT= 1\nAPI_MAIL_PORT= 2\nAPI_ELASTIC_PORT= 3\nAPI_PORT= 4");

        let ports = port_mappings("api", "API_", &consolidated, &exclusions(&[]));

        assert_eq!(ports, vec!["${API_PORT}:${API_PORT}"]);
    }

    #[test]
    fn test_port_requires_prefix_and_marker() {
        let consolidated = ConsolidatedEnv::parse("OTHER_PORT= 1\nAPI_PORTAL= 2\nAPI_HOST= 3");

        let ports = port_mappings("api", "API_", &consolidated, &exclusions(&[]));

        assert_eq!(ports, vec!["${API_PORTAL}:${API_PORTAL}"]);
    }

    #[test]
    fn test_rewrite_document() {
        let tree = ServiceTree::new()
            .with_service("web", "HOST=localhost\nTIMEOUT=5\nAPP_PORT=8080")
            .with_service("db", "PORT=5432");
        let registry = ServiceRegistry::new(
            vec![ServiceEntry::new("db", "db/.env", "DB_")],
            vec![ServiceEntry::new("web", "web/.env", "WEB_")],
        );
        let root = tree.root();
        let rewriter = ComposeRewriter::new(&registry, &root, Some(tree.path().to_path_buf()));

        let mut doc = ComposeDocument::parse(
            r#"
services:
  web:
    image: "myimg:1.0"
    ports: ["1:1"]
  db:
    image: postgres
  cache:
    image: redis
    environment: [KEEP=1]
"#,
        )
        .unwrap();
        let consolidated = ConsolidatedEnv::parse(
            "DB_PORT= 5432\nWEB_HOST= localhost\nWEB_APP_PORT= 8080\nWEB_DB_PORT= 5432",
        );

        let outcomes = rewriter.rewrite(&mut doc, &consolidated);

        assert_eq!(
            outcomes,
            vec![
                ("web".to_string(), ServiceRewrite::Rewritten { environment: 3, ports: 1 }),
                ("db".to_string(), ServiceRewrite::Rewritten { environment: 1, ports: 1 }),
                ("cache".to_string(), ServiceRewrite::Skipped),
            ]
        );
        assert_eq!(
            strings(doc.service_field("web", "environment")),
            vec!["HOST=${WEB_HOST}", "TIMEOUT=${TIMEOUT}", "APP_PORT=${WEB_APP_PORT}"]
        );
        assert_eq!(
            strings(doc.service_field("web", "ports")),
            vec!["${WEB_APP_PORT}:${WEB_APP_PORT}"]
        );
        assert_eq!(
            strings(doc.service_field("db", "environment")),
            vec!["PORT=${DB_PORT}"]
        );
        assert_eq!(strings(doc.service_field("cache", "environment")), vec!["KEEP=1"]);
        assert_eq!(
            doc.service_field("web", "image"),
            Some(&Value::String("myimg:1.0".to_string()))
        );
    }

    #[test]
    fn test_missing_service_env_file_skips() {
        let tree = ServiceTree::new();
        let registry = ServiceRegistry::new(vec![], vec![ServiceEntry::new("web", "web/.env", "WEB_")]);
        let root = tree.root();
        let rewriter = ComposeRewriter::new(&registry, &root, None);
        let mut doc = ComposeDocument::parse("services:\n  web:\n    ports: ['80:80']\n").unwrap();
        let before = doc.clone();

        let outcome = rewriter.rewrite_service(
            &mut doc,
            "web",
            &ConsolidatedEnv::parse("WEB_PORT= 80"),
        );

        assert_eq!(outcome, ServiceRewrite::Skipped);
        assert_eq!(doc, before);
    }

    #[test]
    fn test_service_env_file_without_discover_dir() {
        let tree = ServiceTree::new();
        let registry = ServiceRegistry::new(vec![], vec![ServiceEntry::new("web", "./web/.env", "WEB_")]);
        let root = tree.root();
        let rewriter = ComposeRewriter::new(&registry, &root, None);

        assert_eq!(
            rewriter.service_env_file("web"),
            Some(tree.path().join("web").join(".env"))
        );
        assert_eq!(rewriter.service_env_file("ghost"), None);
    }

    #[test]
    fn test_service_env_file_joins_discover_dir() {
        let tree = ServiceTree::new();
        let registry = ServiceRegistry::new(vec![], vec![ServiceEntry::new("web", "web/.env", "WEB_")]);
        let root = tree.root();
        let rewriter = ComposeRewriter::new(&registry, &root, Some(root.resolve("services")));

        assert_eq!(
            rewriter.service_env_file("web"),
            Some(tree.path().join("services").join("web").join(".env"))
        );
    }

    #[test]
    fn test_empty_results_keep_template_fields() {
        let tree = ServiceTree::new().with_service("web", "# nothing here\n\n");
        let registry = ServiceRegistry::new(vec![], vec![ServiceEntry::new("web", "web/.env", "WEB_")]);
        let root = tree.root();
        let rewriter = ComposeRewriter::new(&registry, &root, Some(tree.path().to_path_buf()));
        let mut doc = ComposeDocument::parse(
            "services:\n  web:\n    environment: [KEEP=1]\n    ports: [\"80:80\"]\n",
        )
        .unwrap();
        let before = doc.clone();

        let outcome = rewriter.rewrite_service(
            &mut doc,
            "web",
            &ConsolidatedEnv::parse("WEB_HOST= h\nAPI_PORT= 9000"),
        );

        assert_eq!(outcome, ServiceRewrite::Rewritten { environment: 0, ports: 0 });
        assert_eq!(doc, before);
        assert_eq!(strings(doc.service_field("web", "environment")), vec!["KEEP=1"]);
        assert_eq!(strings(doc.service_field("web", "ports")), vec!["80:80"]);
    }
}
