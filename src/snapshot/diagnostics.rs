use serde::{Deserialize, Serialize};

/// Diagnostic log streaming settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticLogs {
    #[serde(default, alias = "applicationLogs")]
    pub application_logs_configuration: Option<ApplicationLogs>,
    #[serde(default, alias = "httpLogs")]
    pub http_logs_configuration: Option<HttpLogs>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationLogs {
    #[serde(default)]
    pub file_system: Option<LevelSink>,
    #[serde(default)]
    pub azure_blob_storage: Option<LevelSink>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpLogs {
    #[serde(default)]
    pub file_system: Option<ToggleSink>,
    #[serde(default)]
    pub azure_blob_storage: Option<ToggleSink>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSink {
    #[serde(default)]
    pub level: Option<String>,
}

impl LevelSink {
    fn is_on(&self) -> bool {
        self.level
            .as_deref()
            .is_some_and(|l| !l.is_empty() && !l.eq_ignore_ascii_case("off"))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleSink {
    #[serde(default)]
    pub enabled: Option<bool>,
}

impl DiagnosticLogs {
    pub fn application_logging_enabled(&self) -> bool {
        self.application_logs_configuration
            .as_ref()
            .is_some_and(|app| {
                [&app.file_system, &app.azure_blob_storage]
                    .into_iter()
                    .flatten()
                    .any(LevelSink::is_on)
            })
    }

    pub fn http_logging_enabled(&self) -> bool {
        self.http_logs_configuration.as_ref().is_some_and(|http| {
            [&http.file_system, &http.azure_blob_storage]
                .into_iter()
                .flatten()
                .any(|sink| sink.enabled == Some(true))
        })
    }
}
