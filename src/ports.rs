use serde::Serialize;
use thiserror::Error;

/// A USB serial port as enumerated on the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetectedPort {
    pub port_name: String,
    pub vid: u16,
    pub pid: u16,
    pub serial_number: Option<String>,
    pub manufacturer: Option<String>,
    pub product: Option<String>,
}

impl DetectedPort {
    pub fn id(&self) -> String {
        format!("serial:{}", self.port_name)
    }

    pub fn matches(&self, vid: u16, pid: u16) -> bool {
        self.vid == vid && self.pid == pid
    }
}

#[derive(Error, Debug)]
pub enum DiscoverError {
    #[error("serial discovery failed: {0}")]
    Serial(#[from] serialport::Error),
}

/// Enumerates USB serial ports, sorted by port name for stable output.
/// Non-USB ports are skipped.
pub fn discover_ports() -> Result<Vec<DetectedPort>, DiscoverError> {
    let mut out: Vec<DetectedPort> = Vec::new();

    for p in serialport::available_ports()? {
        let serialport::SerialPortInfo {
            port_name,
            port_type,
        } = p;

        let serialport::SerialPortType::UsbPort(usb) = port_type else {
            continue;
        };

        out.push(DetectedPort {
            port_name,
            vid: usb.vid,
            pid: usb.pid,
            serial_number: usb.serial_number,
            manufacturer: usb.manufacturer,
            product: usb.product,
        });
    }

    out.sort_by(|a, b| a.port_name.cmp(&b.port_name));

    Ok(out)
}

/// Indices of the ports a host matching on `pairs` would recognize.
pub fn matching_ports(ports: &[DetectedPort], pairs: &[(u16, u16)]) -> Vec<usize> {
    ports
        .iter()
        .enumerate()
        .filter(|(_, p)| pairs.iter().any(|&(vid, pid)| p.matches(vid, pid)))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hwid::{WAKU_PID, WAKU_VID};

    fn port(name: &str, vid: u16, pid: u16) -> DetectedPort {
        DetectedPort {
            port_name: name.to_string(),
            vid,
            pid,
            serial_number: None,
            manufacturer: None,
            product: None,
        }
    }

    #[test]
    fn test_port_id_format() {
        assert_eq!(port("COM6", WAKU_VID, WAKU_PID).id(), "serial:COM6");
        assert_eq!(
            port("/dev/ttyACM0", WAKU_VID, WAKU_PID).id(),
            "serial:/dev/ttyACM0"
        );
    }

    #[test]
    fn test_matching_ports_filters_by_pair() {
        let ports = vec![
            port("COM3", 0x16C0, 0x0483),
            port("COM6", WAKU_VID, WAKU_PID),
            port("COM7", WAKU_VID, 0x1001),
        ];

        let matched = matching_ports(&ports, &[(WAKU_VID, WAKU_PID)]);
        assert_eq!(matched, vec![1]);

        // Same VID with a different PID is not a match.
        assert!(matching_ports(&ports, &[(0x0000, 0x0000)]).is_empty());

        let matched = matching_ports(&ports, &[(WAKU_VID, WAKU_PID), (0x16C0, 0x0483)]);
        assert_eq!(matched, vec![0, 1]);
    }
}
