use clap::Parser;
use tokio::net::TcpListener;

use super::run_with;
use super::Cli;

/// Return the port of a loopback socket that nobody listens on.
async fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap().port()
}

#[tokio::test]
async fn unreachable_instances_exit_with_failure() {
    let instance = format!("127.0.0.1:{}", closed_port().await);
    let args = ["mongors", "-i", instance.as_str(), "-t", "0.2", "ensure", "rs0"];
    let cli = Cli::try_parse_from(args).unwrap();
    let code = run_with(cli).await.unwrap();
    assert_eq!(code, 1);
}

#[tokio::test]
async fn unreachable_instances_skip_health_check() {
    let instance = format!("127.0.0.1:{}", closed_port().await);
    let args = ["mongors", "-i", instance.as_str(), "-t", "0.1", "health", "rs0"];
    let cli = Cli::try_parse_from(args).unwrap();
    let code = run_with(cli).await.unwrap();
    assert_eq!(code, 1);
}
