use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "epd")]
#[command(version)]
#[command(about = "Electronic paper display client for the epdd daemon", long_about = None)]
pub struct Cli {
    /// 데몬 socket 경로 (미지정시 EPD_ENDPOINT 또는 설정 파일의 endpoint 사용)
    #[arg(short = 'e', long, global = true)]
    pub endpoint: Option<PathBuf>,

    /// 요청 timeout (ms)
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// 디버그 로그 출력
    #[arg(short = 'd', long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Action,
}

#[derive(Subcommand, Debug)]
pub enum Action {
    /// 패널 정보 출력
    Info,
    /// 이미지 파일 전송
    Display {
        /// 이미지 파일 (png, bmp, jpeg, gif)
        file: PathBuf,

        /// 전송 후 update 실행
        #[arg(short = 'u', long)]
        update: bool,
    },
    /// 전체 refresh
    Update,
    /// 부분 refresh
    Partial,
    /// 화면 지우기
    Clear,
    /// 화면 깜빡임
    Blink,
    /// 패널 온도 출력
    Temperature,
    /// 설정 파일 관리
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// 기본값으로 설정 파일 생성
    Init,
    /// 현재 적용되는 설정 출력
    Show,
}
