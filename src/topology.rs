//! Topology builder: the ordered address list nodes use to discover each
//! other.
//!
//! One run produces one topology. Line i of the topology file is the
//! endpoint for node index i, so ordering is semantically significant: the
//! index passed to a node process must match its line.

use crate::error::HarnessError;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

/// One node's listen address, canonically rendered as `host:port`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub index: usize,
    pub host: String,
    pub port: u16,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Ordered endpoint list for one run. Indices are contiguous from 0 and
/// ports within a run are unique (`base_port + index`).
#[derive(Debug, Clone)]
pub struct Topology {
    endpoints: Vec<Endpoint>,
}

impl Topology {
    /// Local-only topology: every endpoint on 127.0.0.1.
    pub fn local(nodes: usize, base_port: u16) -> Self {
        let endpoints = (0..nodes)
            .map(|i| Endpoint {
                index: i,
                host: "127.0.0.1".to_string(),
                port: base_port + i as u16,
            })
            .collect();
        Self { endpoints }
    }

    /// Remote topology: endpoint i lives on the i-th supplied host.
    pub fn from_hosts(nodes: usize, base_port: u16, hosts: &[String]) -> Result<Self, HarnessError> {
        if hosts.len() < nodes {
            return Err(HarnessError::InsufficientHosts {
                wanted: nodes,
                got: hosts.len(),
            });
        }
        let endpoints = hosts[..nodes]
            .iter()
            .enumerate()
            .map(|(i, host)| Endpoint {
                index: i,
                host: host.clone(),
                port: base_port + i as u16,
            })
            .collect();
        Ok(Self { endpoints })
    }

    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    /// Overwrite `path` with one `host:port` line per endpoint, no header.
    pub fn write(&self, path: &Path) -> io::Result<()> {
        let mut out = String::new();
        for ep in &self.endpoints {
            out.push_str(&ep.to_string());
            out.push('\n');
        }
        fs::write(path, out)
    }
}

/// Read a plaintext hosts file, one address per line, blank lines ignored.
pub fn read_hosts_file(path: &Path) -> io::Result<Vec<String>> {
    let text = fs::read_to_string(path)?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn local_topology_ports_are_base_plus_index() {
        let topo = Topology::local(4, 9000);
        assert_eq!(topo.endpoints().len(), 4);
        for (i, ep) in topo.endpoints().iter().enumerate() {
            assert_eq!(ep.index, i);
            assert_eq!(ep.host, "127.0.0.1");
            assert_eq!(ep.port, 9000 + i as u16);
        }
    }

    #[test]
    fn written_file_has_one_line_per_endpoint() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ips.txt");

        let topo = Topology::local(3, 9000);
        topo.write(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["127.0.0.1:9000", "127.0.0.1:9001", "127.0.0.1:9002"]);
    }

    #[test]
    fn write_overwrites_previous_topology() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ips.txt");

        Topology::local(5, 9000).write(&path).unwrap();
        Topology::local(2, 9000).write(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn from_hosts_uses_ith_host_for_endpoint_i() {
        let hosts = vec!["10.0.0.1".to_string(), "10.0.0.2".to_string()];
        let topo = Topology::from_hosts(2, 9000, &hosts).unwrap();
        assert_eq!(topo.endpoints()[0].to_string(), "10.0.0.1:9000");
        assert_eq!(topo.endpoints()[1].to_string(), "10.0.0.2:9001");
    }

    #[test]
    fn short_host_list_is_rejected() {
        let hosts = vec!["10.0.0.1".to_string()];
        let err = Topology::from_hosts(3, 9000, &hosts).unwrap_err();
        assert!(matches!(
            err,
            crate::error::HarnessError::InsufficientHosts { wanted: 3, got: 1 }
        ));
    }

    #[test]
    fn hosts_file_skips_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hosts.txt");
        std::fs::write(&path, "10.0.0.1\n\n10.0.0.2\n").unwrap();
        assert_eq!(read_hosts_file(&path).unwrap(), vec!["10.0.0.1", "10.0.0.2"]);
    }
}
