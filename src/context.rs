//! Knowledge context supplied to the model alongside each question.
//!
//! The context either lives in memory for the whole process or is read from a
//! text file on every request, so edits to the file take effect immediately.

use std::path::PathBuf;

use thiserror::Error;

/// Built-in knowledge used when no `KNOWLEDGE_FILE` is configured.
pub const DEFAULT_CONTEXT: &str = "\
Trường Đại học Kinh tế - Đại học Đà Nẵng (DUE) là trường đại học công lập thành viên của Đại học Đà Nẵng, \
địa chỉ 71 Ngũ Hành Sơn, quận Ngũ Hành Sơn, thành phố Đà Nẵng.

Các ngành đào tạo đại học chính quy: Kinh tế, Kinh tế quốc tế, Thống kê kinh tế, Quản trị kinh doanh, \
Marketing, Kinh doanh quốc tế, Kinh doanh thương mại, Thương mại điện tử, Tài chính - Ngân hàng, \
Kế toán, Kiểm toán, Quản trị nhân lực, Hệ thống thông tin quản lý, Khoa học dữ liệu và phân tích kinh doanh, \
Luật, Luật kinh tế, Quản trị dịch vụ du lịch và lữ hành, Quản trị khách sạn, Quản lý nhà nước.

Phương thức xét tuyển: xét tuyển thẳng theo quy chế của Bộ Giáo dục và Đào tạo, xét học bạ THPT, \
xét kết quả thi tốt nghiệp THPT, xét kết quả kỳ thi đánh giá năng lực của Đại học Quốc gia TP. Hồ Chí Minh.

Website: https://due.udn.vn";

#[derive(Debug, Error)]
pub enum ContextError {
    #[error("{}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Where the knowledge text comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum ContextSource {
    Inline(String),
    /// UTF-8 text file, read in full on every call.
    File(PathBuf),
}

impl ContextSource {
    pub async fn load(&self) -> Result<String, ContextError> {
        match self {
            Self::Inline(text) => Ok(text.clone()),
            Self::File(path) => {
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| ContextError::Read {
                        path: path.clone(),
                        source,
                    })
            }
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Inline(text) => format!("inline ({} bytes)", text.len()),
            Self::File(path) => format!("file {}", path.display()),
        }
    }
}
