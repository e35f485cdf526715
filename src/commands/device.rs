use crate::ui::create_spinner;
use colored::*;
use epd::{Bitmap, ClientConfig, Epd, Result};
use std::path::Path;

/// 패널 정보 출력
pub async fn show_info(config: &ClientConfig) -> Result<()> {
    let epd = Epd::connect(config).await?;

    eprintln!("{} Connected to {}", "[OK]".green().bold(), config.endpoint.display());
    println!("  Panel:       {}", epd.panel().bold());
    println!("  Size:        {}x{}", epd.width(), epd.height());
    println!("  COG:         {}", epd.cog());
    println!("  FILM:        {}", epd.film());
    println!("  Protocol:    {}", epd.version());
    println!(
        "  Auto update: {}",
        if epd.auto_update() { "on".green() } else { "off".dimmed() }
    );

    Ok(())
}

/// 이미지 파일 전송
pub async fn display_file(config: &ClientConfig, file: &Path, update: bool) -> Result<()> {
    let mut epd = Epd::connect(config).await?;
    if update {
        epd.set_auto_update(true);
    }

    let spinner = create_spinner(&format!("Converting {}...", file.display()));
    let bitmap = image::open(file)
        .map_err(Into::into)
        .and_then(|image| Bitmap::from_image(&image));
    spinner.finish_and_clear();
    let bitmap = bitmap?;

    if bitmap.size() != epd.size() {
        eprintln!(
            "{} Image is {}x{}, panel is {}x{}",
            "[X]".red(),
            bitmap.width(),
            bitmap.height(),
            epd.width(),
            epd.height()
        );
    }

    let spinner = create_spinner("Sending image...");
    let result = epd.display_bitmap(&bitmap).await;
    spinner.finish_and_clear();
    result?;

    eprintln!(
        "{} Image sent{}",
        "[OK]".green().bold(),
        if epd.auto_update() { " and panel updated" } else { "" }
    );
    if !epd.auto_update() {
        eprintln!("{} Run 'epd update' to refresh the panel", "[TIP]".cyan());
    }

    Ok(())
}

/// 인자 없는 명령어 (update, partial, clear, blink)
#[derive(Debug, Clone, Copy)]
pub enum PanelAction {
    Update,
    Partial,
    Clear,
    Blink,
}

impl PanelAction {
    fn label(&self) -> &'static str {
        match self {
            PanelAction::Update => "update",
            PanelAction::Partial => "partial update",
            PanelAction::Clear => "clear",
            PanelAction::Blink => "blink",
        }
    }
}

pub async fn run_action(config: &ClientConfig, action: PanelAction) -> Result<()> {
    let epd = Epd::connect(config).await?;

    match action {
        PanelAction::Update => epd.update().await?,
        PanelAction::Partial => epd.partial_update().await?,
        PanelAction::Clear => epd.clear().await?,
        PanelAction::Blink => epd.blink().await?,
    }

    eprintln!("{} {} sent", "[OK]".green().bold(), action.label());
    Ok(())
}

/// 패널 온도 출력
pub async fn show_temperature(config: &ClientConfig) -> Result<()> {
    let epd = Epd::connect(config).await?;
    let celsius = epd.temperature().await?;

    println!("{}°C", celsius);
    Ok(())
}
