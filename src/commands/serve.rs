use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use ics_filter_core::Feed;

use crate::server;

pub async fn run(feed: Feed, addr: SocketAddr) -> Result<()> {
    println!("########################################");
    println!("#   Should not be used in production!  #");
    println!("########################################\n");

    server::serve(Arc::new(feed), addr).await
}
