use crate::registry::Tag;

/// How tags are laid out in front of each field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagLayout {
    /// One field-id byte.
    FieldId,
    /// A (channel-id, channel-type) byte pair.
    ChannelType,
}

impl TagLayout {
    pub const fn width(self) -> usize {
        match self {
            TagLayout::FieldId => 1,
            TagLayout::ChannelType => 2,
        }
    }
}

/// What happens when a recognised field has fewer bytes left than its width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortReadPolicy {
    /// Abort the whole decode with a length error; no partial data.
    Strict,
    /// Decode what is present with the missing trailing bytes read as zero,
    /// record a warning, and end the stream.
    ZeroFill,
}

/// What happens when a tag has no registry entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnknownTagPolicy {
    /// Stop decoding and return what was decoded so far as success.
    Stop,
    /// Drop the unknown tag byte with a warning and read the next byte as a tag.
    Skip,
}

/// Where the first tag of an uplink comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitialTag {
    /// Every tag, the first included, is read from the payload.
    InBuffer,
    /// The envelope's fPort names the first field and the payload starts
    /// with that field's value. Without a port the first tag is read from
    /// the payload.
    FromPort,
}

/// Complete description of an uplink grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grammar {
    pub name: &'static str,
    pub tag_layout: TagLayout,
    pub short_read: ShortReadPolicy,
    pub unknown_tag: UnknownTagPolicy,
    pub initial_tag: InitialTag,
}

impl Grammar {
    /// Field-id byte, fixed-width value, next field-id byte, ...
    pub const FIELD_STREAM: Grammar = Grammar {
        name: "field-stream",
        tag_layout: TagLayout::FieldId,
        short_read: ShortReadPolicy::Strict,
        unknown_tag: UnknownTagPolicy::Skip,
        initial_tag: InitialTag::FromPort,
    };

    /// (channel-id, channel-type) pair before every value.
    pub const CHANNEL_TYPE: Grammar = Grammar {
        name: "channel-type",
        tag_layout: TagLayout::ChannelType,
        short_read: ShortReadPolicy::ZeroFill,
        unknown_tag: UnknownTagPolicy::Stop,
        initial_tag: InitialTag::InBuffer,
    };

    /// First tag taken from the envelope rather than the payload.
    ///
    /// Port 0 is reserved for MAC commands and never names a field.
    ///
    /// # Examples
    /// ```
    /// use uplink_core::engine::Grammar;
    /// use uplink_core::registry::Tag;
    ///
    /// assert_eq!(Grammar::FIELD_STREAM.port_tag(Some(20)), Some(Tag::Field(20)));
    /// assert_eq!(Grammar::FIELD_STREAM.port_tag(Some(0)), None);
    /// assert_eq!(Grammar::CHANNEL_TYPE.port_tag(Some(85)), None);
    /// ```
    pub const fn port_tag(&self, f_port: Option<u8>) -> Option<Tag> {
        match (self.initial_tag, self.tag_layout, f_port) {
            (InitialTag::FromPort, TagLayout::FieldId, Some(port)) if port != 0 => {
                Some(Tag::Field(port))
            }
            _ => None,
        }
    }
}
