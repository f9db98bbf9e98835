use clap::Args;
use uuid::Uuid;

use crate::auth::{generate_jwt, Claims};
use crate::config::config;

#[derive(Args, Debug)]
pub struct TokenArgs {
    #[arg(help = "User id to put in the token")]
    pub user_id: Uuid,

    #[arg(long, help = "Validity in hours (defaults to SECURITY_JWT_EXPIRY_HOURS)")]
    pub hours: Option<u64>,
}

pub fn handle(args: TokenArgs) -> anyhow::Result<()> {
    let security = &config().security;
    let hours = args.hours.unwrap_or(security.jwt_expiry_hours);
    let token = generate_jwt(&Claims::new(args.user_id, hours), &security.jwt_secret)?;
    println!("{}", token);
    Ok(())
}
