//! Error Kind - Classification of errors
//!
//! Defines the [`ErrorKind`] enum that maps to HTTP status codes and to a
//! generic translation key used when no more specific message applies.

use serde::Serialize;

/// エラー種別の列挙体
///
/// HTTP ステータスコードと汎用メッセージキーに対応するエラー分類です。
///
/// ## Examples
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// let kind = ErrorKind::Unauthorized;
/// assert_eq!(kind.status_code(), 401);
/// assert_eq!(kind.default_message_key(), "error.UNAUTHORIZED");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorKind {
    /// 400 - 入力が不正
    BadRequest,
    /// 401 - 認証が必要、またはトークンが無効
    Unauthorized,
    /// 403 - アクセス権限なし
    Forbidden,
    /// 404 - リソースが見つからない
    NotFound,
    /// 409 - 現在の状態と競合（重複メールアドレスなど）
    Conflict,
    /// 422 - 入力は正しいが処理できない（無効化されたアカウントなど）
    UnprocessableEntity,
    /// 429 - レート制限超過
    TooManyRequests,
    /// 500 - サーバー内部エラー
    InternalServerError,
    /// 503 - 依存サービス（DB など）が利用不可
    ServiceUnavailable,
}

impl ErrorKind {
    /// HTTP ステータスコードを取得
    #[inline]
    pub const fn status_code(&self) -> u16 {
        match self {
            ErrorKind::BadRequest => 400,
            ErrorKind::Unauthorized => 401,
            ErrorKind::Forbidden => 403,
            ErrorKind::NotFound => 404,
            ErrorKind::Conflict => 409,
            ErrorKind::UnprocessableEntity => 422,
            ErrorKind::TooManyRequests => 429,
            ErrorKind::InternalServerError => 500,
            ErrorKind::ServiceUnavailable => 503,
        }
    }

    /// HTTP の標準的な理由フレーズ
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "Bad Request",
            ErrorKind::Unauthorized => "Unauthorized",
            ErrorKind::Forbidden => "Forbidden",
            ErrorKind::NotFound => "Not Found",
            ErrorKind::Conflict => "Conflict",
            ErrorKind::UnprocessableEntity => "Unprocessable Entity",
            ErrorKind::TooManyRequests => "Too Many Requests",
            ErrorKind::InternalServerError => "Internal Server Error",
            ErrorKind::ServiceUnavailable => "Service Unavailable",
        }
    }

    /// 種別ごとの汎用翻訳キー
    ///
    /// 個別のメッセージを持たないエラー（変換されたライブラリエラーなど）で使用します。
    #[inline]
    pub const fn default_message_key(&self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "error.BAD_REQUEST",
            ErrorKind::Unauthorized => "error.UNAUTHORIZED",
            ErrorKind::Forbidden => "error.FORBIDDEN",
            ErrorKind::NotFound => "error.NOT_FOUND",
            ErrorKind::Conflict => "error.CONFLICT",
            ErrorKind::UnprocessableEntity => "error.UNPROCESSABLE",
            ErrorKind::TooManyRequests => "error.TOO_MANY_REQUESTS",
            ErrorKind::InternalServerError => "error.SERVER.INTERNAL_SERVER",
            ErrorKind::ServiceUnavailable => "error.SERVICE_UNAVAILABLE",
        }
    }

    /// 5xx 系のエラーかどうか
    ///
    /// サーバーエラーは詳細をクライアントに返さず、ログに記録します。
    #[inline]
    pub const fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }

    /// 4xx 系のエラーかどうか
    #[inline]
    pub const fn is_client_error(&self) -> bool {
        let code = self.status_code();
        code >= 400 && code < 500
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
