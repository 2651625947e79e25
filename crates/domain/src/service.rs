//! Service: a named executable definition processes are started from.

use serde::{Deserialize, Serialize};

/// An environment variable passed to a service or process.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Environment {
    #[serde(deserialize_with = "crate::wire::null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "crate::wire::null_as_default")]
    pub value: String,
}

/// A service definition with its default launch arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Service {
    #[serde(deserialize_with = "crate::wire::null_as_default")]
    pub svc_name: String,
    #[serde(deserialize_with = "crate::wire::null_as_default")]
    pub version: String,
    #[serde(deserialize_with = "crate::wire::null_as_default")]
    pub executor: Vec<String>,
    #[serde(deserialize_with = "crate::wire::null_as_default")]
    pub command: String,
    #[serde(deserialize_with = "crate::wire::null_as_default")]
    pub args: Vec<String>,
    #[serde(deserialize_with = "crate::wire::null_as_default")]
    pub environments: Vec<Environment>,
    pub port: i32,
    #[serde(deserialize_with = "crate::wire::null_as_default")]
    pub protocol: String,
    #[serde(deserialize_with = "crate::wire::null_as_default")]
    pub dependencies: Vec<String>,
    #[serde(deserialize_with = "crate::wire::null_as_default")]
    pub endpoints: Vec<String>,
}

impl Service {
    /// Default arguments joined by single spaces, as shown in the
    /// new-process dialog.
    #[must_use]
    pub fn args_line(&self) -> String {
        self.args.join(" ")
    }
}

/// Look up the default argument line of `svc_name`, empty when unknown.
#[must_use]
pub fn default_args_for(services: &[Service], svc_name: &str) -> String {
    services
        .iter()
        .rev()
        .find(|s| s.svc_name == svc_name)
        .map(Service::args_line)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_decode_service_with_null_slices() {
        let svc: Service = serde_json::from_str(
            r#"{"svcName":"pd","executor":null,"args":null,"environments":null,
                "dependencies":null,"endpoints":null}"#,
        )
        .unwrap();
        assert_eq!(svc.svc_name, "pd");
        assert_eq!(svc.args_line(), "");
    }

    fn service(name: &str, args: &[&str]) -> Service {
        Service {
            svc_name: name.to_string(),
            args: args.iter().map(ToString::to_string).collect(),
            ..Service::default()
        }
    }

    #[test]
    fn should_join_args_with_single_spaces() {
        let svc = service("tikv", &["--addr", "0.0.0.0:20160"]);
        assert_eq!(svc.args_line(), "--addr 0.0.0.0:20160");
    }

    #[test]
    fn should_return_default_args_of_known_service() {
        let services = vec![service("pd", &["--name=pd1"]), service("tidb", &["-P", "4000"])];
        assert_eq!(default_args_for(&services, "tidb"), "-P 4000");
    }

    #[test]
    fn should_return_empty_args_for_unknown_service() {
        let services = vec![service("pd", &["--name=pd1"])];
        assert_eq!(default_args_for(&services, "tikv"), "");
    }

    #[test]
    fn should_decode_backend_service() {
        let svc: Service = serde_json::from_str(
            r#"{"svcName":"tidb","version":"1.0","args":["-L","info"],
                "environments":[{"name":"GOMAXPROCS","value":"4"}],"port":4000}"#,
        )
        .unwrap();
        assert_eq!(svc.svc_name, "tidb");
        assert_eq!(svc.port, 4000);
        assert_eq!(svc.environments[0].value, "4");
    }
}
