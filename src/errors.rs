use std::fmt;

#[derive(Debug, Clone)]
pub enum UtmError {
    // 输入校验
    MissingBaseUrl,
    MissingSource,
    InvalidUrl(String),
    Validation(String),
    // 维度管理
    DuplicateName(String),
    NotFound(String),
    CannotRemoveDefault(String),
    InUse(String),
    // 持久化
    UnknownSource(String),
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    // 其它
    Webhook(String),
    FileOperation(String),
    Serialization(String),
    Config(String),
}

impl UtmError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            UtmError::MissingBaseUrl => "E001",
            UtmError::MissingSource => "E002",
            UtmError::InvalidUrl(_) => "E003",
            UtmError::Validation(_) => "E004",
            UtmError::DuplicateName(_) => "E010",
            UtmError::NotFound(_) => "E011",
            UtmError::CannotRemoveDefault(_) => "E012",
            UtmError::InUse(_) => "E013",
            UtmError::UnknownSource(_) => "E020",
            UtmError::DatabaseConfig(_) => "E021",
            UtmError::DatabaseConnection(_) => "E022",
            UtmError::DatabaseOperation(_) => "E023",
            UtmError::Webhook(_) => "E030",
            UtmError::FileOperation(_) => "E040",
            UtmError::Serialization(_) => "E041",
            UtmError::Config(_) => "E042",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            UtmError::MissingBaseUrl => "URL Is Required",
            UtmError::MissingSource => "Source Is Required",
            UtmError::InvalidUrl(_) => "Invalid URL",
            UtmError::Validation(_) => "Validation Error",
            UtmError::DuplicateName(_) => "Duplicate Name",
            UtmError::NotFound(_) => "Not Found",
            UtmError::CannotRemoveDefault(_) => "Cannot Remove Default Campaign",
            UtmError::InUse(_) => "Value In Use",
            UtmError::UnknownSource(_) => "Unknown Source",
            UtmError::DatabaseConfig(_) => "Database Configuration Error",
            UtmError::DatabaseConnection(_) => "Database Connection Error",
            UtmError::DatabaseOperation(_) => "Database Operation Error",
            UtmError::Webhook(_) => "Webhook Error",
            UtmError::FileOperation(_) => "File Operation Error",
            UtmError::Serialization(_) => "Serialization Error",
            UtmError::Config(_) => "Configuration Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            UtmError::MissingBaseUrl => "Please enter a valid URL",
            UtmError::MissingSource => "Please select a UTM source",
            UtmError::InvalidUrl(msg)
            | UtmError::Validation(msg)
            | UtmError::DuplicateName(msg)
            | UtmError::NotFound(msg)
            | UtmError::CannotRemoveDefault(msg)
            | UtmError::InUse(msg)
            | UtmError::UnknownSource(msg)
            | UtmError::DatabaseConfig(msg)
            | UtmError::DatabaseConnection(msg)
            | UtmError::DatabaseOperation(msg)
            | UtmError::Webhook(msg)
            | UtmError::FileOperation(msg)
            | UtmError::Serialization(msg)
            | UtmError::Config(msg) => msg,
        }
    }

    /// Input problems that are rejected before the store is touched
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            UtmError::MissingBaseUrl
                | UtmError::MissingSource
                | UtmError::InvalidUrl(_)
                | UtmError::Validation(_)
        )
    }

    /// Failures of the storage layer, reported to users as "generated but not saved"
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            UtmError::UnknownSource(_)
                | UtmError::DatabaseConfig(_)
                | UtmError::DatabaseConnection(_)
                | UtmError::DatabaseOperation(_)
        )
    }

    /// 格式化为彩色输出（用于 Server 模式）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出（用于 CLI 模式）
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for UtmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for UtmError {}

// 便捷的构造函数
impl UtmError {
    pub fn invalid_url<T: Into<String>>(msg: T) -> Self {
        UtmError::InvalidUrl(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        UtmError::Validation(msg.into())
    }

    pub fn duplicate_name<T: Into<String>>(msg: T) -> Self {
        UtmError::DuplicateName(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        UtmError::NotFound(msg.into())
    }

    pub fn cannot_remove_default<T: Into<String>>(msg: T) -> Self {
        UtmError::CannotRemoveDefault(msg.into())
    }

    pub fn in_use<T: Into<String>>(msg: T) -> Self {
        UtmError::InUse(msg.into())
    }

    pub fn unknown_source<T: Into<String>>(msg: T) -> Self {
        UtmError::UnknownSource(msg.into())
    }

    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        UtmError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        UtmError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        UtmError::DatabaseOperation(msg.into())
    }

    pub fn webhook<T: Into<String>>(msg: T) -> Self {
        UtmError::Webhook(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        UtmError::FileOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        UtmError::Serialization(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        UtmError::Config(msg.into())
    }
}

#[cfg(feature = "server")]
impl UtmError {
    /// HTTP status for API responses
    pub fn http_status(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            UtmError::MissingBaseUrl
            | UtmError::MissingSource
            | UtmError::InvalidUrl(_)
            | UtmError::Validation(_)
            | UtmError::UnknownSource(_) => StatusCode::BAD_REQUEST,
            UtmError::DuplicateName(_) | UtmError::CannotRemoveDefault(_) | UtmError::InUse(_) => {
                StatusCode::CONFLICT
            }
            UtmError::NotFound(_) => StatusCode::NOT_FOUND,
            UtmError::DatabaseConnection(_) => StatusCode::SERVICE_UNAVAILABLE,
            UtmError::DatabaseConfig(_)
            | UtmError::DatabaseOperation(_)
            | UtmError::Webhook(_)
            | UtmError::FileOperation(_)
            | UtmError::Serialization(_)
            | UtmError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for UtmError {
    fn from(err: sea_orm::DbErr) -> Self {
        UtmError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for UtmError {
    fn from(err: std::io::Error) -> Self {
        UtmError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for UtmError {
    fn from(err: serde_json::Error) -> Self {
        UtmError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, UtmError>;
