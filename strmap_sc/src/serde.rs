use ::serde::ser::{Serialize, SerializeMap, Serializer};
use strmap::{Sequence, StrMap};

use crate::{Chain, ScHashMap};

impl<V, H, A> Serialize for ScHashMap<V, H, A>
where
    V: Serialize,
    H: Fn(&str) -> u64,
    A: Sequence<Chain<V>>,
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
