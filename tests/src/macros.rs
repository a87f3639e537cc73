/// Builds a [`kiri::Record`] from `name => value` pairs.
#[macro_export]
macro_rules! record {
    ( $( $name:expr => $value:expr ),* $(,)? ) => {{
        #[allow(unused_mut)]
        let mut record = kiri::Record::new();
        $( record.insert($name, $value); )*
        record
    }};
}

/// Runs each listed `async fn(&mut DbTest)` against every enabled driver.
#[macro_export]
macro_rules! tests {
    (
        $(
            $( #[$attrs:meta] )*
            $f:ident
        ),+ $(,)?
    ) => {
        #[cfg(feature = "sqlite")]
        mod sqlite {
            $(
                #[test]
                $( #[$attrs] )*
                fn $f() {
                    let mut test = $crate::DbTest::sqlite();

                    test.run_test(|test| Box::pin(async move {
                        super::$f(test).await;
                    }));
                }
            )*
        }
    };
}
