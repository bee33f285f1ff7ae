//! Tests for the quote engine

#[cfg(test)]
mod tests {
    use delphi_feeder::oracle::scaling::scale_to_integer;
    use delphi_feeder::oracle::{
        ExchangeSummaryNormalizer, PairMetadataStore, PrecisionOverrides, QuoteBatch, QuoteError,
        SinglePairQuoteExtractor, SymbolOrder,
    };
    use delphi_feeder::types::{PairMetadata, QuoteRecord, RawExchangeQuote, TickerResponse};

    fn bittrex() -> Vec<RawExchangeQuote> {
        let json = r#"[
            {"symbol":"WAXP-BTC","high":"0.000004400000","low":"0.000004320000","volume":"23937.59634439","quoteVolume":"0.10429560","percentChange":"0.92","updatedAt":"2022-09-29T14:29:00.41Z"},
            {"symbol":"WAXP-ETH","high":"0.000063950000","low":"0.000063140000","volume":"1188.11330784","quoteVolume":"0.07539428","percentChange":"-0.96","updatedAt":"2022-09-29T14:31:40.407Z"},
            {"symbol":"WAXP-USD","high":"0.089000000000","low":"0.083031500000","volume":"41745.65723008","quoteVolume":"3552.27106637","percentChange":"-0.66","updatedAt":"2022-09-29T14:31:35.407Z"},
            {"symbol":"WAXP-USDT","high":"0.085434890000","low":"0.083289740000","volume":"67058.57870756","quoteVolume":"5677.65411070","percentChange":"-0.95","updatedAt":"2022-09-29T14:31:00.437Z"}
        ]"#;
        serde_json::from_str(json).unwrap()
    }

    fn pairs() -> PairMetadataStore {
        let json = r#"[
            {"active":1,"name":"waxpbtc","base_symbol":"8,WAXP","quote_symbol":"8,BTC","quoted_precision":8},
            {"active":1,"name":"waxpeos","base_symbol":"8,WAXP","quote_symbol":"4,EOS","quoted_precision":6},
            {"active":1,"name":"waxpeth","base_symbol":"8,WAXP","quote_symbol":"18,ETH","quoted_precision":8},
            {"active":1,"name":"waxpusd","base_symbol":"8,WAXP","quote_symbol":"2,USD","quoted_precision":4}
        ]"#;
        let rows: Vec<PairMetadata> = serde_json::from_str(json).unwrap();
        PairMetadataStore::from_rows(rows)
    }

    fn required_pairs() -> Vec<String> {
        vec!["waxpbtc".into(), "waxpeth".into(), "waxpusd".into()]
    }

    fn normalize(
        raw: &[RawExchangeQuote],
        meta: &PairMetadataStore,
        required: &[String],
    ) -> Vec<QuoteRecord> {
        ExchangeSummaryNormalizer::default()
            .normalize(Some(raw), Some(meta), Some(required))
            .unwrap()
    }

    // ============================================================================
    // Summary normalization
    // ============================================================================

    #[test]
    fn test_extracts_required_pairs_with_precision() {
        let out = normalize(&bittrex(), &pairs(), &required_pairs());
        assert_eq!(
            out,
            vec![
                QuoteRecord::new("waxpbtc", 436),
                QuoteRecord::new("waxpeth", 6355),
                QuoteRecord::new("waxpusd", 860),
            ]
        );
    }

    #[test]
    fn test_deterministic_output() {
        let first = normalize(&bittrex(), &pairs(), &required_pairs());
        for _ in 0..10 {
            assert_eq!(normalize(&bittrex(), &pairs(), &required_pairs()), first);
        }
    }

    #[test]
    fn test_output_subset_of_required_and_metadata() {
        let required = vec!["waxpusdt".to_string(), "waxpbtc".to_string(), "waxpeos".to_string()];
        let meta = pairs();
        let out = normalize(&bittrex(), &meta, &required);

        assert_eq!(out, vec![QuoteRecord::new("waxpbtc", 436)]);
        for record in &out {
            assert!(required.contains(&record.pair));
            assert!(meta.contains(&record.pair));
        }
    }

    #[test]
    fn test_empty_inputs_return_empty() {
        let out = normalize(&[], &PairMetadataStore::new(), &[]);
        assert!(out.is_empty());
    }

    #[test]
    fn test_missing_required_pairs_returns_empty() {
        let out = normalize(&bittrex(), &pairs(), &[]);
        assert!(out.is_empty());
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        let err = ExchangeSummaryNormalizer::default()
            .normalize(None, None, None)
            .unwrap_err();
        assert!(matches!(err, QuoteError::InvalidArgument(_)));
    }

    #[test]
    fn test_inactive_pair_never_emitted() {
        let meta = PairMetadataStore::from_rows(vec![
            PairMetadata::new("waxpbtc", true, 8),
            PairMetadata::new("waxpeth", false, 8),
            PairMetadata::new("waxpusd", true, 4),
        ]);
        let out = normalize(&bittrex(), &meta, &required_pairs());
        assert_eq!(
            out.iter().map(|r| r.pair.as_str()).collect::<Vec<_>>(),
            vec!["waxpbtc", "waxpusd"]
        );
    }

    #[test]
    fn test_quote_first_exchange_and_override() {
        let raw = vec![
            RawExchangeQuote::new("BTC-WAXP", "0.000004400000", "0.000004320000"),
            RawExchangeQuote::new("USD-WAXP", "0.089000000000", "0.083031500000"),
        ];
        let normalizer = ExchangeSummaryNormalizer::new(SymbolOrder::QuoteBase.mapper('-'))
            .with_overrides(PrecisionOverrides::new().with("waxpusd", 2));
        let out = normalizer
            .normalize(Some(raw.as_slice()), Some(&pairs()), Some(required_pairs().as_slice()))
            .unwrap();
        assert_eq!(
            out,
            vec![QuoteRecord::new("waxpbtc", 436), QuoteRecord::new("waxpusd", 86016)]
        );
    }

    // ============================================================================
    // Single-pair extraction
    // ============================================================================

    fn extract(json: &str) -> Option<QuoteRecord> {
        let ticker: Option<TickerResponse> = serde_json::from_str(json).unwrap();
        SinglePairQuoteExtractor::default().extract_single(ticker.as_ref())
    }

    #[test]
    fn test_single_pair_prices() {
        assert_eq!(
            extract(r#"{"result":{"price":"0.12345678"}}"#),
            Some(QuoteRecord::new("waxpeth", 12345678))
        );
        assert_eq!(
            extract(r#"{"result":{"price":"1.23456789"}}"#),
            Some(QuoteRecord::new("waxpeth", 123456789))
        );
        assert_eq!(
            extract(r#"{"result":{"price":"0"}}"#),
            Some(QuoteRecord::new("waxpeth", 0))
        );
        assert_eq!(
            extract(r#"{"result":{"price":"123456789.12345678"}}"#),
            Some(QuoteRecord::new("waxpeth", 12345678912345678))
        );
        assert_eq!(
            extract(r#"{"result":{"price":"0.00000001"}}"#),
            Some(QuoteRecord::new("waxpeth", 1))
        );
    }

    #[test]
    fn test_single_pair_null_response() {
        assert_eq!(extract("null"), None);
    }

    #[test]
    fn test_single_pair_garbage_price_is_zero() {
        assert_eq!(
            extract(r#"{"result":{"price":"--"}}"#),
            Some(QuoteRecord::new("waxpeth", 0))
        );
    }

    // ============================================================================
    // Batch assembly and scaling law
    // ============================================================================

    #[test]
    fn test_batch_from_both_exchanges() {
        let normalized = normalize(&bittrex(), &pairs(), &["waxpbtc".to_string(), "waxpusd".to_string()]);
        let single = extract(r#"{"result":{"price":"0.00006354"}}"#);
        let batch = QuoteBatch::assemble(normalized, single);

        assert_eq!(
            serde_json::to_value(&batch).unwrap(),
            serde_json::json!([
                {"pair": "waxpbtc", "value": 436},
                {"pair": "waxpusd", "value": 860},
                {"pair": "waxpeth", "value": 6354}
            ])
        );
    }

    #[test]
    fn test_scaled_value_approximates_price() {
        for &(price, precision) in &[(0.00000436, 8u32), (0.08601575, 4), (1.23456789, 4), (42.12, 2)] {
            let scaled = scale_to_integer(price, precision) as f64;
            let unit = 10f64.powi(-(precision as i32));
            assert!((scaled * unit - price).abs() <= unit / 2.0 + f64::EPSILON);
        }
    }
}
