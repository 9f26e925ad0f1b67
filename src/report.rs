//! Network interface report for the `report` command.
//!
//! Lists the addresses of every interface that is up, skipping loopback
//! addresses, and renders them as YAML keyed by interface name.

use crate::types::Result;
use nix::ifaddrs::getifaddrs;
use nix::net::if_::InterfaceFlags;
use nix::sys::socket::SockaddrStorage;
use std::collections::BTreeMap;
use std::net::IpAddr;
use tracing::trace;

/// Interface name to addresses in CIDR notation.
pub type AddressReport = BTreeMap<String, Vec<String>>;

/// One address assigned to a local interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceAddr {
    pub name: String,
    pub up: bool,
    pub addr: IpAddr,
    pub prefix_len: u32,
}

impl InterfaceAddr {
    /// Address with its prefix length, e.g. `192.168.1.20/24`.
    pub fn cidr(&self) -> String {
        format!("{}/{}", self.addr, self.prefix_len)
    }
}

/// Enumerate IP addresses on all local interfaces.
pub fn local_addresses() -> Result<Vec<InterfaceAddr>> {
    let mut addrs = Vec::new();

    for ifaddr in getifaddrs()? {
        // Link-layer entries carry no IP address.
        let Some(addr) = ifaddr.address.as_ref().and_then(ip_of) else {
            continue;
        };

        let prefix_len = ifaddr
            .netmask
            .as_ref()
            .and_then(ip_of)
            .map(mask_len)
            .unwrap_or(match addr {
                IpAddr::V4(_) => 32,
                IpAddr::V6(_) => 128,
            });

        trace!("Found {} on {}", addr, ifaddr.interface_name);

        addrs.push(InterfaceAddr {
            name: ifaddr.interface_name,
            up: ifaddr.flags.contains(InterfaceFlags::IFF_UP),
            addr,
            prefix_len,
        });
    }

    Ok(addrs)
}

/// Group addresses by interface, keeping only non-loopback addresses on interfaces that are up.
pub fn group_addresses<I>(addrs: I) -> AddressReport
where
    I: IntoIterator<Item = InterfaceAddr>,
{
    let mut report = AddressReport::new();

    for addr in addrs {
        if !addr.up || addr.addr.is_loopback() {
            continue;
        }
        report.entry(addr.name.clone()).or_default().push(addr.cidr());
    }

    report
}

/// Render the report as YAML.
pub fn render(report: &AddressReport) -> Result<String> {
    Ok(serde_yaml::to_string(report)?)
}

/// Enumerate, filter, and render the local address report.
pub fn build_report() -> Result<String> {
    let report = group_addresses(local_addresses()?);
    render(&report)
}

fn ip_of(storage: &SockaddrStorage) -> Option<IpAddr> {
    if let Some(v4) = storage.as_sockaddr_in() {
        return Some(IpAddr::V4(v4.ip()));
    }
    storage.as_sockaddr_in6().map(|v6| IpAddr::V6(v6.ip()))
}

fn mask_len(mask: IpAddr) -> u32 {
    match mask {
        IpAddr::V4(m) => u32::from(m).count_ones(),
        IpAddr::V6(m) => u128::from(m).count_ones(),
    }
}
