use std::io;
use std::process::ExitCode;

use route_map::config::AppConfig;
use route_map::domain::RouteRecord;
use route_map::pipeline::{Outcome, Source, run};
use route_map::render::LeafletMap;
use route_map::select::{ConsoleChooser, prompt_route_number};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let source = match Source::from_config(&config) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Source::Mock(mock) = &source {
        println!(
            "Using recorded data; routes with stops: {}",
            mock.available_routes().join(", ")
        );
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let route_no = match std::env::args().nth(1) {
        Some(arg) => arg,
        None => match prompt_route_number(&mut input, &mut io::stdout(), &config.city_name) {
            Ok(answer) => answer,
            Err(e) => {
                eprintln!("Error: could not read input: {e}");
                return ExitCode::FAILURE;
            }
        },
    };
    let route_no = route_no.trim();
    if !route_no.is_empty() {
        println!("'{route_no}'번 버스를 검색합니다.");
    }

    let mut chooser = ConsoleChooser::new(&mut input, io::stdout());
    let canvas_for = |route: &RouteRecord| {
        LeafletMap::new(format!(
            "{} {} {}",
            config.city_name,
            route.route_type.label(),
            route.number
        ))
    };

    match run(&config, &source, &mut chooser, canvas_for, route_no).await {
        Ok(Outcome::Rendered { route, path, .. }) => {
            println!(
                "선택된 노선: {} {} ({} ↔ {})",
                route.route_type, route.number, route.declared_origin, route.declared_terminus
            );
            println!();
            println!("✅ 노선도가 '{}' 파일로 저장되었습니다.", path.display());
            ExitCode::SUCCESS
        }
        Ok(Outcome::NotFound { route_no }) => {
            println!("'{route_no}'번 버스 정보를 찾을 수 없습니다.");
            ExitCode::SUCCESS
        }
        Ok(Outcome::Cancelled) => {
            println!("선택이 취소되었습니다.");
            ExitCode::SUCCESS
        }
        Ok(Outcome::NothingToRender { route }) => {
            println!("{}번 버스: 지도에 표시할 정류장 정보가 없습니다.", route.number);
            ExitCode::SUCCESS
        }
        Ok(Outcome::NoInput) => {
            println!("노선 번호가 입력되지 않았습니다.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
