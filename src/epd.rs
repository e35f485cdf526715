use crate::bitmap::Bitmap;
use crate::config::ClientConfig;
use crate::daemon::client::DaemonClient;
use crate::daemon::protocol::{Command, Parameter};
use crate::daemon::transport::{Transport, UnixTransport};
use crate::error::{EpdError, Result};
use crate::panel::PanelDescriptor;
use image::DynamicImage;
use tracing::{debug, info};

/// EPD 클라이언트
///
/// 생성 시 데몬에 `get version`, `get panel`을 차례로 보내 패널 정보를 확정하고,
/// 이후에는 다시 조회하지 않는다. 요청마다 새 연결을 사용한다.
///
/// ```no_run
/// # async fn run() -> epd::Result<()> {
/// use epd::{ClientConfig, Epd};
///
/// let epd = Epd::connect(&ClientConfig::default()).await?;
/// let image = image::DynamicImage::new_luma8(epd.width(), epd.height());
/// epd.clear().await?;
/// epd.display(&image).await?;
/// epd.update().await?;
/// # Ok(())
/// # }
/// ```
pub struct Epd<T: Transport = UnixTransport> {
    client: DaemonClient<T>,
    panel: PanelDescriptor,
    version: String,
    auto_update: bool,
}

impl Epd<UnixTransport> {
    /// 설정의 endpoint로 접속
    pub async fn connect(config: &ClientConfig) -> Result<Self> {
        Self::with_transport(config.transport(), config.auto_update).await
    }
}

impl<T: Transport> Epd<T> {
    /// 임의의 transport로 생성
    pub async fn with_transport(transport: T, auto_update: bool) -> Result<Self> {
        let client = DaemonClient::new(transport);

        let version = client.query(Parameter::Version).await?;
        let line = client.query(Parameter::Panel).await?;

        let panel = PanelDescriptor::parse(&line)?;
        panel.validate()?;

        info!(
            endpoint = %client.transport().endpoint().display(),
            panel = %panel,
            version = %version,
            "connected to EPD daemon"
        );

        Ok(Self {
            client,
            panel,
            version,
            auto_update,
        })
    }

    pub fn size(&self) -> (u32, u32) {
        self.panel.size()
    }

    pub fn width(&self) -> u32 {
        self.panel.width
    }

    pub fn height(&self) -> u32 {
        self.panel.height
    }

    /// 패널 이름과 버전 (예: "EPD 2.0")
    pub fn panel(&self) -> &str {
        &self.panel.panel
    }

    pub fn descriptor(&self) -> &PanelDescriptor {
        &self.panel
    }

    /// 데몬 프로토콜 버전
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn cog(&self) -> u32 {
        self.panel.cog
    }

    pub fn film(&self) -> u32 {
        self.panel.film
    }

    pub fn auto_update(&self) -> bool {
        self.auto_update
    }

    /// 다음 `display` 호출부터 적용
    pub fn set_auto_update(&mut self, flag: bool) {
        self.auto_update = flag;
    }

    /// 이미지를 1비트로 변환해 전송
    ///
    /// 변환은 매번 수행되므로, 같은 이미지를 반복 표시할 때는
    /// `Bitmap::from_image` 후 `display_bitmap`을 쓰는 편이 낫다.
    pub async fn display(&self, image: &DynamicImage) -> Result<()> {
        let bitmap = Bitmap::from_image(image)?;
        self.display_bitmap(&bitmap).await
    }

    /// 변환된 비트맵 전송. auto-update가 켜져 있으면 이어서 `update`
    pub async fn display_bitmap(&self, bitmap: &Bitmap) -> Result<()> {
        bitmap.check_size(self.size())?;

        debug!(bytes = bitmap.as_bytes().len(), "transferring image");
        self.client.execute(&bitmap.to_command()).await?;

        if self.auto_update {
            self.update().await?;
        }

        Ok(())
    }

    /// 패널 전체 refresh
    pub async fn update(&self) -> Result<()> {
        self.client.execute(&Command::Update).await
    }

    /// 부분 refresh
    pub async fn partial_update(&self) -> Result<()> {
        self.client.execute(&Command::Partial).await
    }

    pub async fn clear(&self) -> Result<()> {
        self.client.execute(&Command::Clear).await
    }

    pub async fn blink(&self) -> Result<()> {
        self.client.execute(&Command::Blink).await
    }

    /// 패널 온도 (섭씨, 데몬이 -99..99로 제한)
    pub async fn temperature(&self) -> Result<i32> {
        let value = self.client.query(Parameter::Temperature).await?;
        value
            .trim()
            .parse()
            .map_err(|_| EpdError::Parse(format!("invalid temperature: {:?}", value)))
    }
}
