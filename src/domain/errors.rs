use thiserror::Error;

/// 会員名のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemberNameError {
    /// 空文字または空白のみ
    #[error("member name must not be empty")]
    Empty,
    /// 最大文字数を超えた
    #[error("member name is too long ({actual} > {max} characters)")]
    TooLong { max: usize, actual: usize },
    /// 制御文字（NUL等）を含む
    #[error("member name must not contain control characters (found {found:?})")]
    ControlCharacter { found: char },
}
