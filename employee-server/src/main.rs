use employee_server::{Server, ServerState, print_banner, setup_environment};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 设置环境 (dotenv, 配置, 日志)
    let config = setup_environment()?;

    print_banner();

    tracing::info!(
        environment = %config.environment,
        work_dir = %config.work_dir,
        "Employee server starting..."
    );

    // 2. 初始化服务器状态 (工作目录、数据库、编号分配器)
    let state = ServerState::initialize(&config).await?;

    // 3. 启动 HTTP 服务器，Ctrl-C 优雅退出
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
