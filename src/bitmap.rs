//! 이미지 -> 1비트 래스터 변환 및 전송용 인코딩
//!
//! 래스터 형식: 행 단위, 픽셀당 1비트, MSB가 왼쪽 픽셀, 1 = 흰색,
//! 각 행은 바이트 경계까지 패딩된다.

use crate::daemon::protocol::{Command, Endian};
use crate::error::{EpdError, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use image::imageops::{self, BiLevel};
use image::{DynamicImage, GrayImage};

/// 데몬이 기대하는 래스터 방향 (설정 불가)
const INVERTED: bool = true;
const ENDIAN: Endian = Endian::Little;

/// 전송 준비가 끝난 1비트 이미지
///
/// 같은 이미지를 여러 번 표시할 때는 한 번만 변환해 두고 재사용하면 된다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Bitmap {
    /// 임의의 이미지를 1비트로 변환
    ///
    /// 흑백(0/255)이 아니면 grayscale 변환 후 Floyd-Steinberg dithering을 적용한다.
    pub fn from_image(image: &DynamicImage) -> Result<Self> {
        let mut gray = image.to_luma8();

        if !is_single_bit(&gray) {
            imageops::dither(&mut gray, &BiLevel);
        }

        if !is_single_bit(&gray) {
            return Err(single_bit_error());
        }

        Ok(Self::pack(&gray))
    }

    /// 이미 패킹된 1비트 래스터로 생성
    pub fn from_packed(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        if data.len() != row_bytes(width) * height as usize {
            return Err(single_bit_error());
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    fn pack(gray: &GrayImage) -> Self {
        let (width, height) = gray.dimensions();
        let stride = row_bytes(width);
        let mut data = vec![0u8; stride * height as usize];

        for (x, y, pixel) in gray.enumerate_pixels() {
            if pixel.0[0] != 0 {
                let index = y as usize * stride + (x / 8) as usize;
                data[index] |= 0x80 >> (x % 8);
            }
        }

        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// 패킹된 래스터 바이트
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// 패널 크기와 정확히 일치하는지 검사
    pub fn check_size(&self, panel_size: (u32, u32)) -> Result<()> {
        if self.size() != panel_size {
            return Err(EpdError::Validation("image size mismatch".to_string()));
        }
        Ok(())
    }

    pub fn to_base64(&self) -> String {
        BASE64.encode(&self.data)
    }

    /// `image` 명령어 생성
    pub fn to_command(&self) -> Command {
        Command::Image {
            data: self.to_base64(),
            inverted: INVERTED,
            endian: ENDIAN,
        }
    }
}

/// 한 행의 바이트 수
pub fn row_bytes(width: u32) -> usize {
    (width as usize + 7) / 8
}

fn is_single_bit(gray: &GrayImage) -> bool {
    gray.pixels().all(|p| p.0[0] == 0 || p.0[0] == 255)
}

fn single_bit_error() -> EpdError {
    EpdError::Validation("only single bit images are supported".to_string())
}
