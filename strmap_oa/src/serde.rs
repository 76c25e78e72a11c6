use ::serde::ser::{Serialize, SerializeMap, Serializer};
use strmap::{Sequence, StrMap};

use crate::{OaHashMap, Slot};

impl<V, H, A> Serialize for OaHashMap<V, H, A>
where
    V: Serialize,
    H: Fn(&str) -> u64,
    A: Sequence<Slot<V>>,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.size()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
