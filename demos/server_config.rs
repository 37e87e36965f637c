use std::error::Error;

use ini_lean::{ValueType, get_key};

const CONFIG: &[u8] = b"[server.main]\n\
    # This server is used for clustering\n\
    hostname=root\n\
    distro=Ubuntu\n\
    ssh_port=99\n\
    [server.labs]\n\
    hostname=honeypot\n\
    distro=Debian\n\
    ssh_port=80\n";

fn main() -> Result<(), Box<dyn Error>> {
    let mut hostname = [0u8; 64];
    get_key(
        Some(b"server.main"),
        b"hostname",
        CONFIG,
        &mut hostname,
        ValueType::String,
    )?;
    let length = hostname.iter().position(|&b| b == 0).unwrap_or(0);
    println!(
        "Name of main server: {}",
        str::from_utf8(&hostname[..length])?
    );

    let mut port = [0u8; 4];
    get_key(
        Some(b"server.main"),
        b"ssh_port",
        CONFIG,
        &mut port,
        ValueType::Integer,
    )?;
    let port = i32::from_ne_bytes(port);
    if port <= 1024 {
        println!("Please change the port from {port} to a number above 1024");
    }

    let mut distro = [0u8; 64];
    get_key(
        Some(b"server.labs"),
        b"distro",
        CONFIG,
        &mut distro,
        ValueType::String,
    )?;
    if distro.starts_with(b"Arch\0") {
        println!("You have a proper distro installed");
    }

    Ok(())
}
