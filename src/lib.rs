//! EPD 데몬 클라이언트
//!
//! 로컬 Unix socket으로 EPD 데몬과 통신해 패널 정보를 조회하고,
//! 1비트 이미지를 전송하고, 화면 refresh를 요청한다.

pub mod bitmap;
pub mod config;
pub mod daemon;
pub mod epd;
pub mod error;
pub mod panel;

#[cfg(test)]
mod testing;

pub use bitmap::Bitmap;
pub use config::ClientConfig;
pub use epd::Epd;
pub use error::{EpdError, Result};
pub use panel::PanelDescriptor;
