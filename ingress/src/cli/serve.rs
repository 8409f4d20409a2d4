//! serve サブコマンド
//!
//! Ingressサーバーを起動します。指定された値は環境変数由来の設定を上書きします。

use clap::Args;
use serve_ingress_common::config::IngressConfig;

/// serve サブコマンドの引数
#[derive(Args, Debug, Clone, Default)]
pub struct ServeArgs {
    /// Listen port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Bind address
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Disable the /llm service
    #[arg(long, default_value_t = false)]
    pub no_llm: bool,
}

impl ServeArgs {
    /// 引数で指定された値を設定に反映する
    pub fn apply(&self, config: &mut IngressConfig) {
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if self.no_llm {
            config.llm_disabled = true;
        }
    }
}
