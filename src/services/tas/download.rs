//! 助教名单下载（CSV / YAML）

use actix_web::http::header::CONTENT_DISPOSITION;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::TaService;
use crate::errors::Result;
use crate::models::{
    ApiResponse, ErrorCode,
    roles::entities::{RoleKind, RosterRecord},
};

/// 名单导出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterFormat {
    Csv,
    Yaml,
}

impl RosterFormat {
    pub fn parse(format: &str) -> Option<Self> {
        match format.trim().to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "yml" | "yaml" => Some(Self::Yaml),
            _ => None,
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Csv => "text/csv",
            Self::Yaml => "text/yaml",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Csv => "ta_list.csv",
            Self::Yaml => "ta_list.yml",
        }
    }
}

/// 每行 `user_name,last_name,first_name,email`，无表头，`\n` 结尾
///
/// 字段原样逗号拼接，不加引号也不转义。
pub fn render_csv(records: &[RosterRecord]) -> Result<Vec<u8>> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(vec![]);

    for record in records {
        wtr.serialize(record)?;
    }

    wtr.into_inner()
        .map_err(|e| crate::errors::RosterError::serialization(format!("CSV 生成失败: {e}")))
}

/// 映射序列，键顺序 user_name, last_name, first_name, email
pub fn render_yaml(records: &[RosterRecord]) -> Result<String> {
    Ok(serde_yaml::to_string(records)?)
}

pub async fn download_tas(
    service: &TaService,
    course_id: i64,
    format: Option<&str>,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let requested = format.unwrap_or("csv");
    let Some(format) = RosterFormat::parse(requested) else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ExportFormatUnsupported,
            format!("Unsupported download format: {requested}"),
        )));
    };

    let storage = service.get_storage(request);
    let records = match storage.list_roster(course_id, RoleKind::Ta).await {
        Ok(records) => records,
        Err(e) => {
            error!("查询助教名单失败: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::ExportFailed,
                    format!("Failed to export TA list: {e}"),
                )),
            );
        }
    };

    let body = match format {
        RosterFormat::Csv => render_csv(&records),
        RosterFormat::Yaml => render_yaml(&records).map(String::into_bytes),
    };

    match body {
        Ok(body) => Ok(HttpResponse::Ok()
            .content_type(format.content_type())
            .insert_header((
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", format.file_name()),
            ))
            .body(body)),
        Err(e) => {
            error!("生成助教名单失败: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::ExportFailed,
                    format!("Failed to export TA list: {e}"),
                )),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<RosterRecord> {
        vec![
            RosterRecord {
                user_name: "c5bennet".to_string(),
                last_name: "Clark".to_string(),
                first_name: "Bennet".to_string(),
                email: Some("cb@example.com".to_string()),
            },
            RosterRecord {
                user_name: "c5granad".to_string(),
                last_name: "Granada".to_string(),
                first_name: "Ada".to_string(),
                email: None,
            },
        ]
    }

    #[test]
    fn test_csv_has_no_header_and_trailing_newline() {
        let csv = String::from_utf8(render_csv(&records()).unwrap()).unwrap();
        assert_eq!(
            csv,
            "c5bennet,Clark,Bennet,cb@example.com\nc5granad,Granada,Ada,\n"
        );
        assert_eq!(csv.lines().count(), 2);
    }

    #[test]
    fn test_csv_fields_are_joined_verbatim() {
        let records = vec![RosterRecord {
            user_name: "c5jr".to_string(),
            last_name: "Bob \"B\"".to_string(),
            first_name: "Smith, Jr.".to_string(),
            email: Some("b@example.com".to_string()),
        }];
        let csv = String::from_utf8(render_csv(&records).unwrap()).unwrap();
        assert_eq!(csv, "c5jr,Bob \"B\",Smith, Jr.,b@example.com\n");
    }

    #[test]
    fn test_csv_empty_roster() {
        assert!(render_csv(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_yaml_key_order() {
        let yaml = render_yaml(&records()).unwrap();
        let first = yaml.lines().take(4).collect::<Vec<_>>();
        assert_eq!(
            first,
            vec![
                "- user_name: c5bennet",
                "  last_name: Clark",
                "  first_name: Bennet",
                "  email: cb@example.com",
            ]
        );
        let parsed: Vec<serde_yaml::Value> = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.len(), 2);
    }

    #[test]
    fn test_format_parse() {
        assert_eq!(RosterFormat::parse("csv"), Some(RosterFormat::Csv));
        assert_eq!(RosterFormat::parse("yml"), Some(RosterFormat::Yaml));
        assert_eq!(RosterFormat::parse("YAML"), Some(RosterFormat::Yaml));
        assert_eq!(RosterFormat::parse("xml"), None);
    }
}
