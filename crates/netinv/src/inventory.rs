//! Network address inventory records

use serde::{Deserialize, Serialize};

/// Reserved ID meaning "no such record" or "not yet resolved"
pub const NONE: i32 = 0;

/// Kind of endpoint a network address points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum NodeType {
    /// Not yet classified
    #[default]
    Unknown,
    /// HTTP endpoint
    Http,
    /// Database endpoint
    Database,
    /// RPC framework endpoint
    Rpc,
    /// Message queue endpoint
    Mq,
    /// Cache server endpoint
    Cache,
}

impl NodeType {
    /// Decode from the stored integer form; unknown values map to `Unknown`
    pub fn from_i32(value: i32) -> Self {
        match value {
            1 => NodeType::Http,
            2 => NodeType::Database,
            3 => NodeType::Rpc,
            4 => NodeType::Mq,
            5 => NodeType::Cache,
            _ => NodeType::Unknown,
        }
    }

    /// Stored integer form
    pub fn as_i32(self) -> i32 {
        match self {
            NodeType::Unknown => 0,
            NodeType::Http => 1,
            NodeType::Database => 2,
            NodeType::Rpc => 3,
            NodeType::Mq => 4,
            NodeType::Cache => 5,
        }
    }
}

impl From<i32> for NodeType {
    fn from(value: i32) -> Self {
        NodeType::from_i32(value)
    }
}

impl From<NodeType> for i32 {
    fn from(value: NodeType) -> Self {
        value.as_i32()
    }
}

/// A registered network address
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NetworkAddressInventory {
    /// Inventory ID, `NONE` until registered
    pub sequence: i32,
    /// The address text, e.g. `10.0.0.1:3306`
    pub name: String,
    /// Endpoint classification
    pub node_type: NodeType,
    /// Registration time, epoch millis
    pub register_time: i64,
    /// Last heartbeat, epoch millis
    pub heartbeat_time: i64,
}

impl NetworkAddressInventory {
    /// Create a record for `name` with the given ID
    pub fn new(sequence: i32, name: impl Into<String>) -> Self {
        Self {
            sequence,
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the node type
    pub fn with_node_type(mut self, node_type: NodeType) -> Self {
        self.node_type = node_type;
        self
    }

    /// Set register and heartbeat time
    pub fn with_register_time(mut self, time: i64) -> Self {
        self.register_time = time;
        self.heartbeat_time = time;
        self
    }

    /// Cache key for an address. Identity on the text.
    pub fn build_id(network_address: &str) -> String {
        network_address.to_string()
    }

    /// A record without an address carries no information
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }
}
