use crate::core::types::{ParamSet, RequestEnvelope};
use md5::{Digest, Md5};

/// Canonicalize parameters for signing.
///
/// The textual forms of the values are concatenated in ascending key order
/// with no separators. An empty set canonicalizes to the empty string. The
/// server verifier recomputes exactly this string, so the rendering rules in
/// [`crate::core::types::ParamValue`] must not drift.
#[must_use]
pub fn canonicalize(params: &ParamSet) -> String {
    let mut canonical = String::new();
    for value in params.values() {
        canonical.push_str(&value.to_string());
    }
    canonical
}

/// Signs gateway requests with the project's shared secret.
pub struct RequestSigner {
    project: u64,
    secret: String,
}

impl RequestSigner {
    pub fn new(project: u64, secret: String) -> Self {
        Self { project, secret }
    }

    /// Compute the request signature.
    ///
    /// Wire layout is `MD5(timestamp || project || action || canonical_params
    /// || secret)` with numeric fields in base-10 and no delimiters, encoded
    /// as 32 lowercase hex characters.
    #[must_use]
    pub fn sign(&self, timestamp: u64, action: &str, params: &ParamSet) -> String {
        let payload = format!(
            "{}{}{}{}{}",
            timestamp,
            self.project,
            action,
            canonicalize(params),
            self.secret
        );

        let mut hasher = Md5::new();
        hasher.update(payload.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Build a signed envelope for `action` at `timestamp`.
    ///
    /// The signature always covers the params (empty set canonicalizes to
    /// ""); the `params` field itself is dropped from the envelope when the
    /// set is empty.
    #[must_use]
    pub fn build_envelope(
        &self,
        action: &str,
        params: ParamSet,
        timestamp: u64,
    ) -> RequestEnvelope {
        let sign = self.sign(timestamp, action, &params);

        RequestEnvelope {
            project: self.project,
            timestamp,
            action: action.to_string(),
            params: if params.is_empty() {
                None
            } else {
                Some(params)
            },
            sign,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ParamValue;

    fn check_params() -> ParamSet {
        let mut params = ParamSet::new();
        params.insert("txn_id".to_string(), ParamValue::from(0i64));
        params.insert("paysystem".to_string(), ParamValue::from(7));
        params.insert("account".to_string(), ParamValue::from("9522771693"));
        params.insert("amount".to_string(), ParamValue::from(1));
        params.insert("currency".to_string(), ParamValue::from("RUB"));
        params
    }

    #[test]
    fn canonical_form_sorts_keys_and_concatenates_values() {
        // Sorted keys: account, amount, currency, paysystem, txn_id
        assert_eq!(canonicalize(&check_params()), "95227716931RUB70");
    }

    #[test]
    fn canonical_form_ignores_insertion_order() {
        let mut reversed = ParamSet::new();
        reversed.insert("currency".to_string(), ParamValue::from("RUB"));
        reversed.insert("amount".to_string(), ParamValue::from(1));
        reversed.insert("account".to_string(), ParamValue::from("9522771693"));
        reversed.insert("txn_id".to_string(), ParamValue::from(0i64));
        reversed.insert("paysystem".to_string(), ParamValue::from(7));

        assert_eq!(canonicalize(&reversed), canonicalize(&check_params()));
    }

    #[test]
    fn canonical_form_of_empty_set_is_empty() {
        assert_eq!(canonicalize(&ParamSet::new()), "");
    }

    #[test]
    fn signature_matches_known_vector() {
        let signer = RequestSigner::new(1290, "secret".to_string());
        // MD5("1700000000" + "1290" + "check" + "95227716931RUB70" + "secret")
        assert_eq!(
            signer.sign(1_700_000_000, "check", &check_params()),
            "2cbb701f1beefa73b9a53414440a347a"
        );
    }

    #[test]
    fn signature_with_empty_params_matches_known_vector() {
        let signer = RequestSigner::new(1290, "secret".to_string());
        // MD5("1700000000" + "1290" + "main_balance" + "" + "secret")
        assert_eq!(
            signer.sign(1_700_000_000, "main_balance", &ParamSet::new()),
            "56d4ec507220d28fa0b973bba270877a"
        );
    }

    #[test]
    fn signature_is_deterministic() {
        let signer = RequestSigner::new(1290, "secret".to_string());
        let first = signer.sign(1_700_000_000, "check", &check_params());
        let second = signer.sign(1_700_000_000, "check", &check_params());
        assert_eq!(first, second);
    }

    #[test]
    fn signature_is_sensitive_to_every_input() {
        let signer = RequestSigner::new(1290, "secret".to_string());
        let baseline = signer.sign(1_700_000_000, "check", &check_params());

        assert_ne!(signer.sign(1_700_000_001, "check", &check_params()), baseline);
        assert_ne!(signer.sign(1_700_000_000, "pay", &check_params()), baseline);

        let other_project = RequestSigner::new(1291, "secret".to_string());
        assert_ne!(
            other_project.sign(1_700_000_000, "check", &check_params()),
            baseline
        );

        let other_secret = RequestSigner::new(1290, "terces".to_string());
        assert_ne!(
            other_secret.sign(1_700_000_000, "check", &check_params()),
            baseline
        );

        let mut tweaked = check_params();
        tweaked.insert("amount".to_string(), ParamValue::from(2));
        assert_ne!(signer.sign(1_700_000_000, "check", &tweaked), baseline);
    }

    #[test]
    fn signature_is_lowercase_hex() {
        let signer = RequestSigner::new(1290, "secret".to_string());
        let sign = signer.sign(1_700_000_000, "errors", &ParamSet::new());
        assert_eq!(sign.len(), 32);
        assert!(sign.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn envelope_drops_empty_params_but_signs_them() {
        let signer = RequestSigner::new(1290, "secret".to_string());
        let envelope = signer.build_envelope("main_balance", ParamSet::new(), 1_700_000_000);

        assert!(envelope.params.is_none());
        assert_eq!(envelope.sign, "56d4ec507220d28fa0b973bba270877a");
    }

    #[test]
    fn envelope_keeps_populated_params() {
        let signer = RequestSigner::new(1290, "secret".to_string());
        let envelope = signer.build_envelope("check", check_params(), 1_700_000_000);

        assert_eq!(envelope.action, "check");
        assert_eq!(envelope.timestamp, 1_700_000_000);
        assert_eq!(envelope.params.as_ref().map(ParamSet::len), Some(5));
        assert_eq!(envelope.sign, "2cbb701f1beefa73b9a53414440a347a");
    }
}
