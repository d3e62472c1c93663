// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Runtime values.
//!
//! [`Variant`] is the tagged union carried by every Value attribute: one of
//! the built-in scalar types or a homogeneous N-dimensional array. A variant
//! knows its own DataType node id and effective value rank, which is what the
//! write path validates against a variable's declared type metadata.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SpaceError;
use crate::ids::DataTypeId;
use crate::nodeid::NodeId;
use crate::qualified_name::{LocalizedText, QualifiedName};

/// Declared value-rank constants.
pub mod value_rank {
    /// The value must be a scalar.
    pub const SCALAR: i32 = -1;
    /// The value may be a scalar or an array of any rank.
    pub const ANY: i32 = -2;
    /// The value may be a scalar or a one-dimensional array.
    pub const SCALAR_OR_ONE_DIMENSION: i32 = -3;
    /// The value must be an array with one or more dimensions.
    pub const ONE_OR_MORE_DIMENSIONS: i32 = 0;
    /// The value must be a one-dimensional array.
    pub const ONE_DIMENSION: i32 = 1;
}

// =============================================================================
// BuiltinType
// =============================================================================

/// The built-in types a [`Variant`] can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuiltinType {
    /// Boolean.
    Boolean,
    /// Signed 8-bit integer.
    SByte,
    /// Unsigned 8-bit integer.
    Byte,
    /// Signed 16-bit integer.
    Int16,
    /// Unsigned 16-bit integer.
    UInt16,
    /// Signed 32-bit integer.
    Int32,
    /// Unsigned 32-bit integer.
    UInt32,
    /// Signed 64-bit integer.
    Int64,
    /// Unsigned 64-bit integer.
    UInt64,
    /// 32-bit float.
    Float,
    /// 64-bit float.
    Double,
    /// UTF-8 string.
    String,
    /// UTC timestamp.
    DateTime,
    /// GUID.
    Guid,
    /// Raw byte string.
    ByteString,
    /// Node identifier.
    NodeId,
    /// Qualified name.
    QualifiedName,
    /// Localized text.
    LocalizedText,
}

impl BuiltinType {
    /// Returns the standard numeric id of the corresponding DataType node.
    pub const fn type_id(&self) -> u32 {
        match self {
            BuiltinType::Boolean => 1,
            BuiltinType::SByte => 2,
            BuiltinType::Byte => 3,
            BuiltinType::Int16 => 4,
            BuiltinType::UInt16 => 5,
            BuiltinType::Int32 => 6,
            BuiltinType::UInt32 => 7,
            BuiltinType::Int64 => 8,
            BuiltinType::UInt64 => 9,
            BuiltinType::Float => 10,
            BuiltinType::Double => 11,
            BuiltinType::String => 12,
            BuiltinType::DateTime => 13,
            BuiltinType::Guid => 14,
            BuiltinType::ByteString => 15,
            BuiltinType::NodeId => 17,
            BuiltinType::QualifiedName => 20,
            BuiltinType::LocalizedText => 21,
        }
    }

    /// Returns the DataType node id for this built-in type.
    pub const fn data_type_id(&self) -> NodeId {
        NodeId::numeric(0, self.type_id())
    }
}

impl fmt::Display for BuiltinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

// =============================================================================
// Variant
// =============================================================================

/// A runtime value: a built-in scalar or a homogeneous array.
///
/// # Examples
///
/// ```
/// use sentra_core::{Variant, BuiltinType};
///
/// let scalar = Variant::Double(21.5);
/// assert_eq!(scalar.value_rank(), -1);
///
/// let array = Variant::array(
///     BuiltinType::Int32,
///     vec![Variant::Int32(1), Variant::Int32(2)],
/// )
/// .unwrap();
/// assert_eq!(array.value_rank(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Variant {
    /// No value.
    Empty,
    /// Boolean scalar.
    Boolean(bool),
    /// Signed 8-bit scalar.
    SByte(i8),
    /// Unsigned 8-bit scalar.
    Byte(u8),
    /// Signed 16-bit scalar.
    Int16(i16),
    /// Unsigned 16-bit scalar.
    UInt16(u16),
    /// Signed 32-bit scalar.
    Int32(i32),
    /// Unsigned 32-bit scalar.
    UInt32(u32),
    /// Signed 64-bit scalar.
    Int64(i64),
    /// Unsigned 64-bit scalar.
    UInt64(u64),
    /// 32-bit float scalar.
    Float(f32),
    /// 64-bit float scalar.
    Double(f64),
    /// String scalar.
    String(String),
    /// UTC timestamp scalar.
    DateTime(DateTime<Utc>),
    /// GUID scalar.
    Guid(Uuid),
    /// Byte-string scalar.
    ByteString(Vec<u8>),
    /// Node id scalar.
    NodeId(NodeId),
    /// Qualified name scalar.
    QualifiedName(QualifiedName),
    /// Localized text scalar.
    LocalizedText(LocalizedText),
    /// Homogeneous N-dimensional array.
    Array(ArrayValue),
}

impl Variant {
    /// Creates a one-dimensional array after checking element homogeneity.
    pub fn array(element_type: BuiltinType, elements: Vec<Variant>) -> Result<Self, SpaceError> {
        let len = elements.len() as u32;
        Self::array_nd(element_type, elements, vec![len])
    }

    /// Creates an N-dimensional array.
    ///
    /// Elements are stored flattened in row-major order; the product of
    /// `dimensions` must equal the element count and every element must be a
    /// scalar of `element_type`.
    pub fn array_nd(
        element_type: BuiltinType,
        elements: Vec<Variant>,
        dimensions: Vec<u32>,
    ) -> Result<Self, SpaceError> {
        if dimensions.is_empty() {
            return Err(SpaceError::invalid_value("array dimensions must not be empty"));
        }
        let expected: u64 = dimensions.iter().map(|d| u64::from(*d)).product();
        if expected != elements.len() as u64 {
            return Err(SpaceError::invalid_value(format!(
                "array has {} elements but dimensions {:?} require {}",
                elements.len(),
                dimensions,
                expected
            )));
        }
        for element in &elements {
            if element.scalar_type() != Some(element_type) {
                return Err(SpaceError::invalid_value(format!(
                    "array element is not a {element_type} scalar"
                )));
            }
        }
        Ok(Variant::Array(ArrayValue {
            element_type,
            elements,
            dimensions,
        }))
    }

    /// Returns `true` for [`Variant::Empty`].
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Variant::Empty)
    }

    /// Returns `true` for array values.
    #[inline]
    pub fn is_array(&self) -> bool {
        matches!(self, Variant::Array(_))
    }

    /// Returns the built-in type of a scalar value.
    pub fn scalar_type(&self) -> Option<BuiltinType> {
        let ty = match self {
            Variant::Empty | Variant::Array(_) => return None,
            Variant::Boolean(_) => BuiltinType::Boolean,
            Variant::SByte(_) => BuiltinType::SByte,
            Variant::Byte(_) => BuiltinType::Byte,
            Variant::Int16(_) => BuiltinType::Int16,
            Variant::UInt16(_) => BuiltinType::UInt16,
            Variant::Int32(_) => BuiltinType::Int32,
            Variant::UInt32(_) => BuiltinType::UInt32,
            Variant::Int64(_) => BuiltinType::Int64,
            Variant::UInt64(_) => BuiltinType::UInt64,
            Variant::Float(_) => BuiltinType::Float,
            Variant::Double(_) => BuiltinType::Double,
            Variant::String(_) => BuiltinType::String,
            Variant::DateTime(_) => BuiltinType::DateTime,
            Variant::Guid(_) => BuiltinType::Guid,
            Variant::ByteString(_) => BuiltinType::ByteString,
            Variant::NodeId(_) => BuiltinType::NodeId,
            Variant::QualifiedName(_) => BuiltinType::QualifiedName,
            Variant::LocalizedText(_) => BuiltinType::LocalizedText,
        };
        Some(ty)
    }

    /// Returns the built-in type, using the element type for arrays.
    pub fn builtin_type(&self) -> Option<BuiltinType> {
        match self {
            Variant::Array(array) => Some(array.element_type),
            other => other.scalar_type(),
        }
    }

    /// Returns the DataType node id describing this value.
    pub fn data_type_id(&self) -> Option<NodeId> {
        self.builtin_type().map(|t| t.data_type_id())
    }

    /// Returns the effective value rank: `-1` for scalars, the dimension
    /// count for arrays.
    pub fn value_rank(&self) -> i32 {
        match self {
            Variant::Array(array) => array.dimensions.len() as i32,
            _ => value_rank::SCALAR,
        }
    }

    /// Checks this value against a variable's declared dataType and valueRank.
    ///
    /// An [`Variant::Empty`] value never matches. A declared dataType of
    /// BaseDataType accepts any concrete type.
    pub fn compatible_with(&self, data_type: &NodeId, declared_rank: i32) -> bool {
        if self.is_empty() {
            return false;
        }
        let rank_ok = match declared_rank {
            value_rank::ANY => true,
            value_rank::SCALAR => !self.is_array(),
            value_rank::SCALAR_OR_ONE_DIMENSION => self.value_rank() <= 1,
            value_rank::ONE_OR_MORE_DIMENSIONS => self.is_array(),
            n if n >= 1 => self.value_rank() == n,
            _ => false,
        };
        if !rank_ok {
            return false;
        }
        if *data_type == DataTypeId::BASE_DATA_TYPE {
            return true;
        }
        self.data_type_id().is_some_and(|id| id == *data_type)
    }

    /// Returns the boolean value, if this is a Boolean scalar.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Variant::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as `i64` for any signed integer scalar.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Variant::SByte(v) => Some(i64::from(*v)),
            Variant::Int16(v) => Some(i64::from(*v)),
            Variant::Int32(v) => Some(i64::from(*v)),
            Variant::Int64(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as `f64` for Float and Double scalars.
    pub fn as_double(&self) -> Option<f64> {
        match self {
            Variant::Float(v) => Some(f64::from(*v)),
            Variant::Double(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the string value, if this is a String scalar.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Variant::String(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the node id value, if this is a NodeId scalar.
    pub fn as_node_id(&self) -> Option<&NodeId> {
        match self {
            Variant::NodeId(v) => Some(v),
            _ => None,
        }
    }
}

impl Default for Variant {
    fn default() -> Self {
        Variant::Empty
    }
}

macro_rules! variant_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Variant {
                fn from(value: $ty) -> Self {
                    Variant::$variant(value)
                }
            }
        )*
    };
}

variant_from! {
    bool => Boolean,
    i8 => SByte,
    u8 => Byte,
    i16 => Int16,
    u16 => UInt16,
    i32 => Int32,
    u32 => UInt32,
    i64 => Int64,
    u64 => UInt64,
    f32 => Float,
    f64 => Double,
    String => String,
    DateTime<Utc> => DateTime,
    Uuid => Guid,
    NodeId => NodeId,
    QualifiedName => QualifiedName,
    LocalizedText => LocalizedText,
}

impl From<&str> for Variant {
    fn from(value: &str) -> Self {
        Variant::String(value.to_string())
    }
}

// =============================================================================
// ArrayValue
// =============================================================================

/// A homogeneous N-dimensional array, stored flattened in row-major order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayValue {
    element_type: BuiltinType,
    elements: Vec<Variant>,
    dimensions: Vec<u32>,
}

impl ArrayValue {
    /// Returns the element type.
    pub fn element_type(&self) -> BuiltinType {
        self.element_type
    }

    /// Returns the flattened elements.
    pub fn elements(&self) -> &[Variant] {
        &self.elements
    }

    /// Returns the dimension sizes.
    pub fn dimensions(&self) -> &[u32] {
        &self.dimensions
    }
}
