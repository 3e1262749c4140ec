//! Checkpoint variable remapping tests
//!
//! Exercises the decoder scope rewrite on a realistic caption-model variable
//! list, checking that the produced map goes from rewritten name back to the
//! original checkpoint name.

use captionkit_rs::captionkit::architectures::base::remap::remap_decoder_name_scope;

#[test]
fn test_realistic_checkpoint_variable_list() {
    let checkpoint_names = [
        "decoder/logits/kernel:0",
        "decoder/logits/bias:0",
        "decoder/lstm_cell/kernel:0",
        "decoder/lstm_cell/bias:0",
        "decoder_1/attention/dense/kernel:0",
        "decoder_2/attention/dense/bias:0",
        "decoder_embedding/embeddings:0",
        "global_step:0",
    ];

    let remapped = remap_decoder_name_scope(checkpoint_names);
    assert_eq!(remapped.len(), checkpoint_names.len());

    // Logits variables lose the decoder scope entirely
    assert_eq!(
        remapped.get("logits/kernel").map(String::as_str),
        Some("decoder/logits/kernel:0")
    );
    assert_eq!(
        remapped.get("logits/bias").map(String::as_str),
        Some("decoder/logits/bias:0")
    );

    // Recurrent variables move under the rnn scope, numbered scopes included
    assert_eq!(
        remapped.get("rnn/lstm_cell/kernel").map(String::as_str),
        Some("decoder/lstm_cell/kernel:0")
    );
    assert_eq!(
        remapped.get("rnn/lstm_cell/bias").map(String::as_str),
        Some("decoder/lstm_cell/bias:0")
    );
    assert_eq!(
        remapped
            .get("rnn/attention/dense/kernel")
            .map(String::as_str),
        Some("decoder_1/attention/dense/kernel:0")
    );
    assert_eq!(
        remapped.get("rnn/attention/dense/bias").map(String::as_str),
        Some("decoder_2/attention/dense/bias:0")
    );

    // Names that merely contain "decoder" as a prefix of a longer scope
    // segment are untouched apart from the tensor suffix
    assert_eq!(
        remapped.get("decoder_embedding/embeddings").map(String::as_str),
        Some("decoder_embedding/embeddings:0")
    );
    assert_eq!(
        remapped.get("global_step").map(String::as_str),
        Some("global_step:0")
    );
}

#[test]
fn test_names_without_tensor_suffix_pass_through() {
    let remapped = remap_decoder_name_scope(["decoder/lstm_cell/kernel"]);
    assert_eq!(
        remapped.get("rnn/lstm_cell/kernel").map(String::as_str),
        Some("decoder/lstm_cell/kernel")
    );
}
